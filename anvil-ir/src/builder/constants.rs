use super::IrBuilder;
use crate::types::Type;
use crate::values::Constant;

impl IrBuilder {
    pub fn const_int(&self, ty: Type, value: i64) -> Constant {
        Constant::int(ty, value)
    }

    pub fn const_float(&self, ty: Type, value: f64) -> Constant {
        Constant::float(ty, value)
    }

    pub fn const_null(&self, pointer_type: Type) -> Constant {
        Constant::null(pointer_type)
    }

    pub fn const_undef(&self, ty: Type) -> Constant {
        Constant::undef(ty)
    }

    pub fn const_zero(&self, ty: Type) -> Constant {
        Constant::zero(ty)
    }

    /// Array of `element_type` sized to `elements`
    pub fn const_array(&self, element_type: Type, elements: Vec<Constant>) -> Constant {
        Constant::array(element_type, elements)
    }

    pub fn const_struct(&self, ty: Type, fields: Vec<Constant>) -> Constant {
        Constant::structure(ty, fields)
    }

    /// `i1 1`
    pub fn const_true(&self) -> Constant {
        Constant::int(Type::i1(), 1)
    }

    /// `i1 0`
    pub fn const_false(&self) -> Constant {
        Constant::int(Type::i1(), 0)
    }
}
