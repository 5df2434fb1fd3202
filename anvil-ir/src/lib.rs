//! Anvil Intermediate Representation
//!
//! An in-memory, LLVM-flavoured IR: build modules of functions, blocks and
//! instructions programmatically, then print them as text.
//!
//! ## Architecture
//!
//! The crate is structured as follows:
//! - `types` - Type system (Type, StructType, FunctionType)
//! - `values` - Operand values and constants
//! - `ops` - Binary, cast and comparison operations
//! - `instructions` - Opcode-tagged instructions
//! - `blocks` - Basic blocks and their CFG adjacency
//! - `function` - Functions and arguments
//! - `module` - Module arenas, globals and named types
//! - `builder` - IR construction with an insertion cursor
//! - `printer` - Textual rendering
//!
//! A [`Module`] owns every node in arenas; everything else refers to nodes
//! through the handles re-exported from `anvil_common`.

// Public exports - clean API surface
pub use anvil_common::{BlockId, FunctionId, GlobalId, InstId, IrError};
pub use self::types::{FunctionType, StructType, Type, TypeKind, POINTER_BITS};
pub use self::values::{format_float, Constant, Value};
pub use self::ops::{ArithFlags, BinaryOp, CastOp, FCmpPredicate, ICmpPredicate};
pub use self::instructions::{Arity, Callee, InstKind, Instruction, Opcode, PhiIncoming, SwitchCase};
pub use self::blocks::BasicBlock;
pub use self::function::{Argument, FuncAttribute, Function};
pub use self::module::{Global, Linkage, Module};
pub use self::builder::{BuilderConfig, IrBuilder};
pub use self::printer::{BlockDisplay, FunctionDisplay, GlobalDisplay, InstructionDisplay};

// Internal modules
mod types;
mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod module;
mod builder;
mod printer;
