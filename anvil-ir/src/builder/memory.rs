use anvil_common::InstId;
use super::IrBuilder;
use crate::instructions::InstKind;
use crate::types::Type;
use crate::values::{Constant, Value};

impl IrBuilder {
    /// Stack slot for one `ty`; the result is a `ptr<ty>`.
    pub fn create_alloca(&mut self, ty: Type, name: &str) -> InstId {
        self.alloca(ty, None, 0, name)
    }

    pub fn create_alloca_with_count(&mut self, ty: Type, count: impl Into<Value>, name: &str) -> InstId {
        self.alloca(ty, Some(count.into()), 0, name)
    }

    pub fn create_aligned_alloca(&mut self, ty: Type, align: u32, name: &str) -> InstId {
        self.alloca(ty, None, align, name)
    }

    fn alloca(&mut self, ty: Type, count: Option<Value>, align: u32, name: &str) -> InstId {
        let name = self.result_name(name);
        let result_type = Type::pointer(ty.clone());
        let kind = InstKind::Alloca { allocated_type: ty, count, align };
        self.insert(kind, result_type, name)
    }

    // ===== Loads and stores =====

    pub fn create_load(&mut self, ty: Type, ptr: impl Into<Value>, name: &str) -> InstId {
        self.load(ty, ptr.into(), false, 0, name)
    }

    pub fn create_volatile_load(&mut self, ty: Type, ptr: impl Into<Value>, name: &str) -> InstId {
        self.load(ty, ptr.into(), true, 0, name)
    }

    pub fn create_aligned_load(&mut self, ty: Type, ptr: impl Into<Value>, align: u32, name: &str) -> InstId {
        self.load(ty, ptr.into(), false, align, name)
    }

    fn load(&mut self, ty: Type, ptr: Value, volatile: bool, align: u32, name: &str) -> InstId {
        let name = self.result_name(name);
        self.insert(InstKind::Load { ptr, volatile, align }, ty, name)
    }

    pub fn create_store(&mut self, value: impl Into<Value>, ptr: impl Into<Value>) -> InstId {
        self.store(value.into(), ptr.into(), false, 0)
    }

    pub fn create_volatile_store(&mut self, value: impl Into<Value>, ptr: impl Into<Value>) -> InstId {
        self.store(value.into(), ptr.into(), true, 0)
    }

    pub fn create_aligned_store(&mut self, value: impl Into<Value>, ptr: impl Into<Value>, align: u32) -> InstId {
        self.store(value.into(), ptr.into(), false, align)
    }

    fn store(&mut self, value: Value, ptr: Value, volatile: bool, align: u32) -> InstId {
        self.insert(InstKind::Store { value, ptr, volatile, align }, Type::Void, None)
    }

    // ===== Address computation =====

    /// Element address computation. The result is always `ptr<source_type>`,
    /// whatever the indices select.
    pub fn create_gep(&mut self, source_type: Type, ptr: impl Into<Value>, indices: Vec<Value>, name: &str) -> InstId {
        self.gep(source_type, ptr.into(), indices, false, name)
    }

    pub fn create_in_bounds_gep(&mut self, source_type: Type, ptr: impl Into<Value>, indices: Vec<Value>, name: &str) -> InstId {
        self.gep(source_type, ptr.into(), indices, true, name)
    }

    /// Address of field `field` of the struct behind `ptr` (`i32 0, i32 field`).
    pub fn create_struct_gep(&mut self, struct_type: Type, ptr: impl Into<Value>, field: u32, name: &str) -> InstId {
        let indices = vec![
            Value::Constant(Constant::int(Type::i32(), 0)),
            Value::Constant(Constant::int(Type::i32(), i64::from(field))),
        ];
        self.gep(struct_type, ptr.into(), indices, false, name)
    }

    fn gep(&mut self, source_type: Type, ptr: Value, indices: Vec<Value>, in_bounds: bool, name: &str) -> InstId {
        let name = self.result_name(name);
        let result_type = Type::pointer(source_type.clone());
        let kind = InstKind::GetElementPtr { source_type, ptr, indices, in_bounds };
        self.insert(kind, result_type, name)
    }
}
