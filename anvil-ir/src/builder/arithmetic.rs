use anvil_common::{InstId, IrError};
use super::IrBuilder;
use crate::instructions::InstKind;
use crate::ops::{ArithFlags, BinaryOp, FCmpPredicate, ICmpPredicate};
use crate::types::Type;
use crate::values::Value;

/// Generates one `create_*` method per binary opcode.
macro_rules! binary_ops {
    ($($(#[$doc:meta])* $method:ident => $op:ident, $flags:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>, name: &str) -> InstId {
                self.create_binary_with_flags(BinaryOp::$op, lhs, rhs, ArithFlags::$flags, name)
            }
        )*
    };
}

/// Generates one `create_icmp_*` method per integer predicate.
macro_rules! icmp_ops {
    ($($method:ident => $pred:ident;)*) => {
        $(
            pub fn $method(&mut self, lhs: impl Into<Value>, rhs: impl Into<Value>, name: &str) -> InstId {
                self.create_icmp(ICmpPredicate::$pred, lhs, rhs, name)
            }
        )*
    };
}

impl IrBuilder {
    /// Binary operation whose result has the type of `lhs`
    pub fn create_binary(&mut self, op: BinaryOp, lhs: impl Into<Value>, rhs: impl Into<Value>, name: &str) -> InstId {
        self.create_binary_with_flags(op, lhs, rhs, ArithFlags::NONE, name)
    }

    pub fn create_binary_with_flags(
        &mut self,
        op: BinaryOp,
        lhs: impl Into<Value>,
        rhs: impl Into<Value>,
        flags: ArithFlags,
        name: &str,
    ) -> InstId {
        let lhs = lhs.into();
        let ty = self.module.type_of(&lhs);
        let name = self.result_name(name);
        let kind = InstKind::Binary { op, lhs, rhs: rhs.into(), flags };
        self.insert(kind, ty, name)
    }

    /// Binary operation from a generic operand list. Anything other than
    /// two operands is rejected before an instruction or a name is created.
    pub fn create_binary_from(&mut self, op: BinaryOp, operands: &[Value], name: &str) -> Result<InstId, IrError> {
        let kind = InstKind::binary_from(op, operands, ArithFlags::NONE)?;
        let ty = self.module.type_of(&operands[0]);
        let name = self.result_name(name);
        Ok(self.insert(kind, ty, name))
    }

    binary_ops! {
        create_add => Add, NONE;
        /// `add nsw`
        create_nsw_add => Add, NSW;
        /// `add nuw`
        create_nuw_add => Add, NUW;
        create_sub => Sub, NONE;
        create_nsw_sub => Sub, NSW;
        create_mul => Mul, NONE;
        create_nsw_mul => Mul, NSW;
        create_udiv => UDiv, NONE;
        /// `udiv exact`
        create_exact_udiv => UDiv, EXACT;
        create_sdiv => SDiv, NONE;
        create_exact_sdiv => SDiv, EXACT;
        create_urem => URem, NONE;
        create_srem => SRem, NONE;
        create_fadd => FAdd, NONE;
        create_fsub => FSub, NONE;
        create_fmul => FMul, NONE;
        create_fdiv => FDiv, NONE;
        create_frem => FRem, NONE;
        create_shl => Shl, NONE;
        create_lshr => LShr, NONE;
        create_ashr => AShr, NONE;
        create_and => And, NONE;
        create_or => Or, NONE;
        create_xor => Xor, NONE;
    }

    // ===== Comparisons =====

    /// Integer comparison producing an `i1`
    pub fn create_icmp(&mut self, predicate: ICmpPredicate, lhs: impl Into<Value>, rhs: impl Into<Value>, name: &str) -> InstId {
        let name = self.result_name(name);
        let kind = InstKind::ICmp { predicate, lhs: lhs.into(), rhs: rhs.into() };
        self.insert(kind, Type::i1(), name)
    }

    /// Floating-point comparison producing an `i1`
    pub fn create_fcmp(&mut self, predicate: FCmpPredicate, lhs: impl Into<Value>, rhs: impl Into<Value>, name: &str) -> InstId {
        let name = self.result_name(name);
        let kind = InstKind::FCmp { predicate, lhs: lhs.into(), rhs: rhs.into() };
        self.insert(kind, Type::i1(), name)
    }

    icmp_ops! {
        create_icmp_eq => Eq;
        create_icmp_ne => Ne;
        create_icmp_ugt => Ugt;
        create_icmp_uge => Uge;
        create_icmp_ult => Ult;
        create_icmp_ule => Ule;
        create_icmp_sgt => Sgt;
        create_icmp_sge => Sge;
        create_icmp_slt => Slt;
        create_icmp_sle => Sle;
    }
}
