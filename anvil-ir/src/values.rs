//! IR Value Representations
//!
//! A [`Value`] is anything usable as an operand. Constants are stored
//! inline; arguments, globals and instructions are referenced by handle and
//! never owned by the instruction that uses them.

use anvil_common::{FunctionId, GlobalId, InstId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::Type;

/// Operand reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Freestanding constant
    Constant(Constant),

    /// Positional argument of a function
    Argument { function: FunctionId, index: usize },

    /// Global variable (its value is a pointer to the storage)
    Global(GlobalId),

    /// Result of an instruction
    Instruction(InstId),
}

impl Value {
    pub fn argument(function: FunctionId, index: usize) -> Self {
        Value::Argument { function, index }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_instruction(&self) -> Option<InstId> {
        match self {
            Value::Instruction(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        Value::Constant(constant)
    }
}

impl From<InstId> for Value {
    fn from(id: InstId) -> Self {
        Value::Instruction(id)
    }
}

impl From<GlobalId> for Value {
    fn from(id: GlobalId) -> Self {
        Value::Global(id)
    }
}

/// Constant values. Immutable and not owned by any container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Int { ty: Type, value: i64 },
    Float { ty: Type, value: f64 },
    Null(Type),
    Undef(Type),
    Array { ty: Type, elements: Vec<Constant> },
    Struct { ty: Type, fields: Vec<Constant> },
    /// Zero initializer for any type
    Zero(Type),
}

impl Constant {
    pub fn int(ty: Type, value: i64) -> Self {
        Constant::Int { ty, value }
    }

    pub fn float(ty: Type, value: f64) -> Self {
        Constant::Float { ty, value }
    }

    pub fn null(pointer_type: Type) -> Self {
        Constant::Null(pointer_type)
    }

    pub fn undef(ty: Type) -> Self {
        Constant::Undef(ty)
    }

    pub fn zero(ty: Type) -> Self {
        Constant::Zero(ty)
    }

    /// Array constant of type `[elements.len() x element_type]`
    pub fn array(element_type: Type, elements: Vec<Constant>) -> Self {
        let ty = Type::array(element_type, elements.len() as u64);
        Constant::Array { ty, elements }
    }

    pub fn structure(ty: Type, fields: Vec<Constant>) -> Self {
        Constant::Struct { ty, fields }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Constant::Int { ty, .. }
            | Constant::Float { ty, .. }
            | Constant::Array { ty, .. }
            | Constant::Struct { ty, .. } => ty,
            Constant::Null(ty) | Constant::Undef(ty) | Constant::Zero(ty) => ty,
        }
    }

    /// The literal as it appears when used inline as an operand.
    pub fn literal(&self) -> String {
        match self {
            Constant::Int { value, .. } => value.to_string(),
            Constant::Float { value, .. } => format_float(*value),
            Constant::Null(_) => "null".to_string(),
            Constant::Undef(_) => "undef".to_string(),
            Constant::Zero(_) => "zeroinitializer".to_string(),
            Constant::Array { elements, .. } => format!("[{}]", join_typed(elements)),
            Constant::Struct { fields, .. } => format!("{{ {} }}", join_typed(fields)),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty(), self.literal())
    }
}

fn join_typed(constants: &[Constant]) -> String {
    constants
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortest `%g`-style rendering: plain decimal for exponents in [-4, 6),
/// scientific with a signed two-digit exponent otherwise.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return value.to_string(),
    };

    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}
