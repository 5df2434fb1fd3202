//! IR Operations
//!
//! Binary operators, cast operators and comparison predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-operand arithmetic and bitwise operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Integer arithmetic
    Add, Sub, Mul,
    UDiv, SDiv,
    URem, SRem,

    // Float arithmetic
    FAdd, FSub, FMul, FDiv, FRem,

    // Bitwise
    Shl, LShr, AShr,
    And, Or, Xor,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul,
        BinaryOp::UDiv, BinaryOp::SDiv, BinaryOp::URem, BinaryOp::SRem,
        BinaryOp::FAdd, BinaryOp::FSub, BinaryOp::FMul, BinaryOp::FDiv, BinaryOp::FRem,
        BinaryOp::Shl, BinaryOp::LShr, BinaryOp::AShr,
        BinaryOp::And, BinaryOp::Or, BinaryOp::Xor,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::UDiv => "udiv",
            BinaryOp::SDiv => "sdiv",
            BinaryOp::URem => "urem",
            BinaryOp::SRem => "srem",
            BinaryOp::FAdd => "fadd",
            BinaryOp::FSub => "fsub",
            BinaryOp::FMul => "fmul",
            BinaryOp::FDiv => "fdiv",
            BinaryOp::FRem => "frem",
            BinaryOp::Shl => "shl",
            BinaryOp::LShr => "lshr",
            BinaryOp::AShr => "ashr",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Overflow and exactness flags carried by binary operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithFlags {
    pub nuw: bool,
    pub nsw: bool,
    pub exact: bool,
}

impl ArithFlags {
    pub const NONE: ArithFlags = ArithFlags { nuw: false, nsw: false, exact: false };
    pub const NSW: ArithFlags = ArithFlags { nuw: false, nsw: true, exact: false };
    pub const NUW: ArithFlags = ArithFlags { nuw: true, nsw: false, exact: false };
    pub const EXACT: ArithFlags = ArithFlags { nuw: false, nsw: false, exact: true };
}

impl fmt::Display for ArithFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nuw { write!(f, " nuw")?; }
        if self.nsw { write!(f, " nsw")?; }
        if self.exact { write!(f, " exact")?; }
        Ok(())
    }
}

/// Conversion operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastOp {
    Trunc,
    ZExt,
    SExt,
    FPTrunc,
    FPExt,
    FPToUI,
    FPToSI,
    UIToFP,
    SIToFP,
    PtrToInt,
    IntToPtr,
    Bitcast,
}

impl CastOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            CastOp::Trunc => "trunc",
            CastOp::ZExt => "zext",
            CastOp::SExt => "sext",
            CastOp::FPTrunc => "fptrunc",
            CastOp::FPExt => "fpext",
            CastOp::FPToUI => "fptoui",
            CastOp::FPToSI => "fptosi",
            CastOp::UIToFP => "uitofp",
            CastOp::SIToFP => "sitofp",
            CastOp::PtrToInt => "ptrtoint",
            CastOp::IntToPtr => "inttoptr",
            CastOp::Bitcast => "bitcast",
        }
    }
}

impl fmt::Display for CastOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Integer comparison predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ICmpPredicate {
    Eq,
    Ne,
    Ugt, Uge, Ult, Ule, // unsigned
    Sgt, Sge, Slt, Sle, // signed
}

impl fmt::Display for ICmpPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pred = match self {
            ICmpPredicate::Eq => "eq",
            ICmpPredicate::Ne => "ne",
            ICmpPredicate::Ugt => "ugt",
            ICmpPredicate::Uge => "uge",
            ICmpPredicate::Ult => "ult",
            ICmpPredicate::Ule => "ule",
            ICmpPredicate::Sgt => "sgt",
            ICmpPredicate::Sge => "sge",
            ICmpPredicate::Slt => "slt",
            ICmpPredicate::Sle => "sle",
        };
        write!(f, "{pred}")
    }
}

/// Floating point comparison predicates.
///
/// `O*` predicates are false when either operand is NaN, `U*` predicates are
/// true in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FCmpPredicate {
    False,
    Oeq, Ogt, Oge, Olt, Ole, One,
    Ord,
    Uno,
    Ueq, Ugt, Uge, Ult, Ule, Une,
    True,
}

impl fmt::Display for FCmpPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pred = match self {
            FCmpPredicate::False => "false",
            FCmpPredicate::Oeq => "oeq",
            FCmpPredicate::Ogt => "ogt",
            FCmpPredicate::Oge => "oge",
            FCmpPredicate::Olt => "olt",
            FCmpPredicate::Ole => "ole",
            FCmpPredicate::One => "one",
            FCmpPredicate::Ord => "ord",
            FCmpPredicate::Uno => "uno",
            FCmpPredicate::Ueq => "ueq",
            FCmpPredicate::Ugt => "ugt",
            FCmpPredicate::Uge => "uge",
            FCmpPredicate::Ult => "ult",
            FCmpPredicate::Ule => "ule",
            FCmpPredicate::Une => "une",
            FCmpPredicate::True => "true",
        };
        write!(f, "{pred}")
    }
}
