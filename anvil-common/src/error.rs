//! Error handling for Anvil IR
//!
//! Construction mistakes that can be reported without tearing down the
//! caller are surfaced as [`IrError`]. Issuing an instruction with no
//! insertion block is not one of them: the builder panics on that.

use crate::ids::InstId;
use thiserror::Error;

/// Errors reported while building or exporting IR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("operand index {index} is out of range for '{opcode}' with {arity} operands")]
    OperandIndexOutOfRange {
        opcode: String,
        index: usize,
        arity: usize,
    },

    #[error("'{opcode}' expects {expected} operands, found {found}")]
    OperandCount {
        opcode: String,
        expected: String,
        found: usize,
    },

    #[error("instruction {0} is not a phi node")]
    NotAPhi(InstId),

    #[error("instruction {0} is not a switch")]
    NotASwitch(InstId),

    #[error("instruction {0} is not attached to a basic block")]
    DetachedInstruction(InstId),

    #[error("no function named '{0}' in module")]
    UnknownFunction(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl IrError {
    pub fn operand_count(opcode: impl ToString, expected: impl ToString, found: usize) -> Self {
        IrError::OperandCount {
            opcode: opcode.to_string(),
            expected: expected.to_string(),
            found,
        }
    }
}
