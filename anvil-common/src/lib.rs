//! Anvil IR - Common Handles and Errors
//!
//! This crate contains the arena handles and the error type shared by
//! every part of the Anvil IR workspace.

pub mod error;
pub mod ids;

pub use error::IrError;
pub use ids::{BlockId, FunctionId, GlobalId, InstId};
