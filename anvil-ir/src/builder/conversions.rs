use anvil_common::InstId;
use super::IrBuilder;
use crate::instructions::InstKind;
use crate::ops::CastOp;
use crate::types::Type;
use crate::values::Value;

macro_rules! cast_ops {
    ($($method:ident => $op:ident;)*) => {
        $(
            pub fn $method(&mut self, value: impl Into<Value>, dest_type: Type, name: &str) -> InstId {
                self.create_cast(CastOp::$op, value, dest_type, name)
            }
        )*
    };
}

impl IrBuilder {
    /// Conversion of `value` to `dest_type`. The pairing of operation and
    /// types is not checked.
    pub fn create_cast(&mut self, op: CastOp, value: impl Into<Value>, dest_type: Type, name: &str) -> InstId {
        let name = self.result_name(name);
        let kind = InstKind::Cast {
            op,
            value: value.into(),
            dest_type: dest_type.clone(),
        };
        self.insert(kind, dest_type, name)
    }

    cast_ops! {
        create_trunc => Trunc;
        create_zext => ZExt;
        create_sext => SExt;
        create_fptrunc => FPTrunc;
        create_fpext => FPExt;
        create_fptoui => FPToUI;
        create_fptosi => FPToSI;
        create_uitofp => UIToFP;
        create_sitofp => SIToFP;
        create_ptrtoint => PtrToInt;
        create_inttoptr => IntToPtr;
        create_bitcast => Bitcast;
    }
}
