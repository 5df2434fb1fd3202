//! IR Instructions
//!
//! An instruction is a value tagged with an opcode. Each [`InstKind`]
//! variant carries exactly the operands and metadata of its opcode, so the
//! operand count of an instruction is fixed when it is constructed.

use anvil_common::{BlockId, FunctionId, IrError};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ops::{ArithFlags, BinaryOp, CastOp, FCmpPredicate, ICmpPredicate};
use crate::types::Type;
use crate::values::{Constant, Value};

/// Operation tag of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // Terminators
    Ret,
    Br,
    CondBr,
    Switch,
    Unreachable,

    Binary(BinaryOp),

    // Memory
    Alloca,
    Load,
    Store,
    GetElementPtr,

    Cast(CastOp),

    ICmp,
    FCmp,
    Phi,
    Select,
    Call,
    ExtractValue,
    InsertValue,
}

impl Opcode {
    /// Terminators end a basic block: ret, br, conditional br, switch and
    /// unreachable.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Opcode::Ret | Opcode::Br | Opcode::CondBr | Opcode::Switch | Opcode::Unreachable
        )
    }

    /// Number of value operands the opcode takes.
    pub fn arity(self) -> Arity {
        match self {
            Opcode::Br | Opcode::Unreachable => Arity::Exactly(0),
            Opcode::Ret | Opcode::Alloca => Arity::Between(0, 1),
            Opcode::CondBr | Opcode::Switch | Opcode::Load | Opcode::Cast(_) => Arity::Exactly(1),
            Opcode::ExtractValue => Arity::Exactly(1),
            Opcode::Binary(_) | Opcode::Store | Opcode::ICmp | Opcode::FCmp => Arity::Exactly(2),
            Opcode::InsertValue => Arity::Exactly(2),
            Opcode::Select => Arity::Exactly(3),
            Opcode::GetElementPtr => Arity::AtLeast(1),
            Opcode::Phi | Opcode::Call => Arity::AtLeast(0),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Ret => write!(f, "ret"),
            Opcode::Br | Opcode::CondBr => write!(f, "br"),
            Opcode::Switch => write!(f, "switch"),
            Opcode::Unreachable => write!(f, "unreachable"),
            Opcode::Binary(op) => write!(f, "{op}"),
            Opcode::Alloca => write!(f, "alloca"),
            Opcode::Load => write!(f, "load"),
            Opcode::Store => write!(f, "store"),
            Opcode::GetElementPtr => write!(f, "getelementptr"),
            Opcode::Cast(op) => write!(f, "{op}"),
            Opcode::ICmp => write!(f, "icmp"),
            Opcode::FCmp => write!(f, "fcmp"),
            Opcode::Phi => write!(f, "phi"),
            Opcode::Select => write!(f, "select"),
            Opcode::Call => write!(f, "call"),
            Opcode::ExtractValue => write!(f, "extractvalue"),
            Opcode::InsertValue => write!(f, "insertvalue"),
        }
    }
}

/// Operand-count contract of an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::Between(lo, hi) => write!(f, "{lo} to {hi}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// One `case` arm of a switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Constant,
    pub target: BlockId,
}

/// One (value, predecessor) pair of a phi node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhiIncoming {
    pub value: Value,
    pub block: BlockId,
}

/// Call target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callee {
    /// Function defined or declared in the same module
    Direct(FunctionId),
    /// Bare symbol name, for callees the module does not know about
    Named(String),
}

/// Opcode-specific payload of an instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstKind {
    Ret {
        value: Option<Value>,
    },

    Br {
        target: BlockId,
    },

    CondBr {
        condition: Value,
        then_block: BlockId,
        else_block: BlockId,
    },

    Switch {
        condition: Value,
        default: BlockId,
        cases: Vec<SwitchCase>,
    },

    Unreachable,

    Binary {
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        flags: ArithFlags,
    },

    /// `count` of `None` allocates a single element
    Alloca {
        allocated_type: Type,
        count: Option<Value>,
        align: u32,
    },

    Load {
        ptr: Value,
        volatile: bool,
        align: u32,
    },

    Store {
        value: Value,
        ptr: Value,
        volatile: bool,
        align: u32,
    },

    GetElementPtr {
        source_type: Type,
        ptr: Value,
        indices: Vec<Value>,
        in_bounds: bool,
    },

    Cast {
        op: CastOp,
        value: Value,
        dest_type: Type,
    },

    ICmp {
        predicate: ICmpPredicate,
        lhs: Value,
        rhs: Value,
    },

    FCmp {
        predicate: FCmpPredicate,
        lhs: Value,
        rhs: Value,
    },

    /// Grows one pair at a time; never deduplicated or checked against the
    /// block's predecessors.
    Phi {
        incoming: Vec<PhiIncoming>,
    },

    Select {
        condition: Value,
        then_value: Value,
        else_value: Value,
    },

    Call {
        callee: Callee,
        args: Vec<Value>,
        tail: bool,
    },

    ExtractValue {
        aggregate: Value,
        indices: Vec<u32>,
    },

    InsertValue {
        aggregate: Value,
        value: Value,
        indices: Vec<u32>,
    },
}

impl InstKind {
    /// Build a binary operation from a generic operand list, rejecting any
    /// list that is not exactly two operands long.
    pub fn binary_from(op: BinaryOp, operands: &[Value], flags: ArithFlags) -> Result<Self, IrError> {
        match operands {
            [lhs, rhs] => Ok(InstKind::Binary {
                op,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
                flags,
            }),
            _ => Err(IrError::operand_count(
                Opcode::Binary(op),
                Opcode::Binary(op).arity(),
                operands.len(),
            )),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            InstKind::Ret { .. } => Opcode::Ret,
            InstKind::Br { .. } => Opcode::Br,
            InstKind::CondBr { .. } => Opcode::CondBr,
            InstKind::Switch { .. } => Opcode::Switch,
            InstKind::Unreachable => Opcode::Unreachable,
            InstKind::Binary { op, .. } => Opcode::Binary(*op),
            InstKind::Alloca { .. } => Opcode::Alloca,
            InstKind::Load { .. } => Opcode::Load,
            InstKind::Store { .. } => Opcode::Store,
            InstKind::GetElementPtr { .. } => Opcode::GetElementPtr,
            InstKind::Cast { op, .. } => Opcode::Cast(*op),
            InstKind::ICmp { .. } => Opcode::ICmp,
            InstKind::FCmp { .. } => Opcode::FCmp,
            InstKind::Phi { .. } => Opcode::Phi,
            InstKind::Select { .. } => Opcode::Select,
            InstKind::Call { .. } => Opcode::Call,
            InstKind::ExtractValue { .. } => Opcode::ExtractValue,
            InstKind::InsertValue { .. } => Opcode::InsertValue,
        }
    }

    /// Value operands in positional order. Block targets are not operands.
    pub fn operands(&self) -> Vec<&Value> {
        match self {
            InstKind::Ret { value } => value.iter().collect(),
            InstKind::Br { .. } | InstKind::Unreachable => Vec::new(),
            InstKind::CondBr { condition, .. } | InstKind::Switch { condition, .. } => vec![condition],
            InstKind::Binary { lhs, rhs, .. }
            | InstKind::ICmp { lhs, rhs, .. }
            | InstKind::FCmp { lhs, rhs, .. } => vec![lhs, rhs],
            InstKind::Alloca { count, .. } => count.iter().collect(),
            InstKind::Load { ptr, .. } => vec![ptr],
            InstKind::Store { value, ptr, .. } => vec![value, ptr],
            InstKind::GetElementPtr { ptr, indices, .. } => {
                std::iter::once(ptr).chain(indices.iter()).collect()
            }
            InstKind::Cast { value, .. } => vec![value],
            InstKind::Phi { incoming } => incoming.iter().map(|inc| &inc.value).collect(),
            InstKind::Select { condition, then_value, else_value } => {
                vec![condition, then_value, else_value]
            }
            InstKind::Call { args, .. } => args.iter().collect(),
            InstKind::ExtractValue { aggregate, .. } => vec![aggregate],
            InstKind::InsertValue { aggregate, value, .. } => vec![aggregate, value],
        }
    }

    fn operands_mut(&mut self) -> Vec<&mut Value> {
        match self {
            InstKind::Ret { value } => value.iter_mut().collect(),
            InstKind::Br { .. } | InstKind::Unreachable => Vec::new(),
            InstKind::CondBr { condition, .. } | InstKind::Switch { condition, .. } => vec![condition],
            InstKind::Binary { lhs, rhs, .. }
            | InstKind::ICmp { lhs, rhs, .. }
            | InstKind::FCmp { lhs, rhs, .. } => vec![lhs, rhs],
            InstKind::Alloca { count, .. } => count.iter_mut().collect(),
            InstKind::Load { ptr, .. } => vec![ptr],
            InstKind::Store { value, ptr, .. } => vec![value, ptr],
            InstKind::GetElementPtr { ptr, indices, .. } => {
                std::iter::once(ptr).chain(indices.iter_mut()).collect()
            }
            InstKind::Cast { value, .. } => vec![value],
            InstKind::Phi { incoming } => incoming.iter_mut().map(|inc| &mut inc.value).collect(),
            InstKind::Select { condition, then_value, else_value } => {
                vec![condition, then_value, else_value]
            }
            InstKind::Call { args, .. } => args.iter_mut().collect(),
            InstKind::ExtractValue { aggregate, .. } => vec![aggregate],
            InstKind::InsertValue { aggregate, value, .. } => vec![aggregate, value],
        }
    }

    /// Blocks this instruction can transfer control to, in operand order.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            InstKind::Br { target } => vec![*target],
            InstKind::CondBr { then_block, else_block, .. } => vec![*then_block, *else_block],
            InstKind::Switch { default, cases, .. } => {
                std::iter::once(*default).chain(cases.iter().map(|c| c.target)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// IR Instruction: an opcode payload plus the value it defines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Display name of the result; `None` for instructions without one
    pub name: Option<String>,
    /// Result type; `Void` when the instruction produces nothing
    pub ty: Type,
    pub kind: InstKind,
    /// Owning block, assigned on insertion
    pub(crate) parent: Option<BlockId>,
}

impl Instruction {
    /// Create an instruction that belongs to no block yet.
    pub fn new(kind: InstKind, ty: Type, name: Option<String>) -> Self {
        Self { name, ty, kind, parent: None }
    }

    pub fn opcode(&self) -> Opcode {
        self.kind.opcode()
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode().is_terminator()
    }

    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn operands(&self) -> Vec<&Value> {
        self.kind.operands()
    }

    pub fn num_operands(&self) -> usize {
        self.kind.operands().len()
    }

    pub fn operand(&self, index: usize) -> Option<&Value> {
        self.kind.operands().get(index).copied()
    }

    /// Replace the operand at `index`. The operand list never grows here;
    /// an index past the end is an error rather than a hole.
    pub fn set_operand(&mut self, index: usize, value: Value) -> Result<(), IrError> {
        let opcode = self.opcode();
        let mut operands = self.kind.operands_mut();
        let arity = operands.len();
        match operands.get_mut(index) {
            Some(slot) => {
                **slot = value;
                Ok(())
            }
            None => Err(IrError::OperandIndexOutOfRange {
                opcode: opcode.to_string(),
                index,
                arity,
            }),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Incoming list of a phi node, `None` for any other opcode.
    pub fn phi_incoming(&self) -> Option<&[PhiIncoming]> {
        match &self.kind {
            InstKind::Phi { incoming } => Some(incoming),
            _ => None,
        }
    }

    pub(crate) fn phi_incoming_mut(&mut self) -> Option<&mut Vec<PhiIncoming>> {
        match &mut self.kind {
            InstKind::Phi { incoming } => Some(incoming),
            _ => None,
        }
    }

    pub(crate) fn switch_cases_mut(&mut self) -> Option<&mut Vec<SwitchCase>> {
        match &mut self.kind {
            InstKind::Switch { cases, .. } => Some(cases),
            _ => None,
        }
    }
}
