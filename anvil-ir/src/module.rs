//! Module and Global Variables
//!
//! The module is the top-level container and owns every node through four
//! arenas: functions, globals, blocks and instructions. Nodes reference each
//! other only through handles, so adjacency lists and operands never own
//! what they point at. Nothing is ever removed from an arena.

use anvil_common::{BlockId, FunctionId, GlobalId, InstId, IrError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use crate::blocks::BasicBlock;
use crate::function::Function;
use crate::instructions::Instruction;
use crate::types::Type;
use crate::values::{Constant, Value};

/// Linkage types for functions and globals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Linkage {
    #[default]
    External,
    Internal,
    Private,
    LinkOnceOdr,
    WeakOdr,
    Common,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Linkage::External => "external",
            Linkage::Internal => "internal",
            Linkage::Private => "private",
            Linkage::LinkOnceOdr => "linkonce_odr",
            Linkage::WeakOdr => "weak_odr",
            Linkage::Common => "common",
        };
        write!(f, "{keyword}")
    }
}

/// Global variable definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Global {
    pub name: String,
    /// Type of the stored value; the global itself is a pointer to it
    pub value_type: Type,
    pub initializer: Option<Constant>,
    pub is_constant: bool,
    pub linkage: Linkage,
    pub address_space: u32,
}

impl Global {
    pub fn new(name: impl Into<String>, value_type: Type, initializer: Option<Constant>) -> Self {
        Self {
            name: name.into(),
            value_type,
            initializer,
            is_constant: false,
            linkage: Linkage::External,
            address_space: 0,
        }
    }

    /// Type of the global as an operand: pointer to the declared type.
    pub fn ty(&self) -> Type {
        Type::pointer_in(self.value_type.clone(), self.address_space)
    }
}

/// IR Module - represents a complete compilation unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub data_layout: Option<String>,
    pub target_triple: Option<String>,
    /// Named struct definitions, printed in name order
    pub named_types: BTreeMap<String, Type>,
    functions: Vec<Function>,
    globals: Vec<Global>,
    blocks: Vec<BasicBlock>,
    instructions: Vec<Instruction>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug!("Created module '{name}'");
        Self { name, ..Self::default() }
    }

    /// An empty string clears the header.
    pub fn set_data_layout(&mut self, layout: impl Into<String>) {
        let layout = layout.into();
        self.data_layout = (!layout.is_empty()).then_some(layout);
    }

    /// An empty string clears the header.
    pub fn set_target_triple(&mut self, triple: impl Into<String>) {
        let triple = triple.into();
        self.target_triple = (!triple.is_empty()).then_some(triple);
    }

    /// Register a named struct. The stored type is returned for use in
    /// signatures and allocations. An empty name registers nothing and
    /// returns the anonymous struct.
    pub fn add_named_type(&mut self, name: impl Into<String>, fields: Vec<Type>, packed: bool) -> Type {
        let name = name.into();
        let ty = Type::named_struct(name.clone(), fields, packed);
        if !name.is_empty() {
            self.named_types.insert(name, ty.clone());
        }
        ty
    }

    pub fn named_type(&self, name: &str) -> Option<&Type> {
        self.named_types.get(name)
    }

    // ===== Functions =====

    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let id = FunctionId::from_index(self.functions.len());
        debug!("Added function '{}' as {id}", function.name);
        self.functions.push(function);
        id
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId::from_index(i), f))
    }

    /// Linear scan by name; `None` when no function matches.
    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.functions
            .iter()
            .position(|f| f.name == name)
            .map(FunctionId::from_index)
    }

    // ===== Globals =====

    pub fn add_global(&mut self, global: Global) -> GlobalId {
        let id = GlobalId::from_index(self.globals.len());
        debug!("Added global '{}' as {id}", global.name);
        self.globals.push(global);
        id
    }

    pub fn global(&self, id: GlobalId) -> &Global {
        &self.globals[id.index()]
    }

    pub fn global_mut(&mut self, id: GlobalId) -> &mut Global {
        &mut self.globals[id.index()]
    }

    pub fn globals(&self) -> impl Iterator<Item = (GlobalId, &Global)> {
        self.globals
            .iter()
            .enumerate()
            .map(|(i, g)| (GlobalId::from_index(i), g))
    }

    /// Linear scan by name; `None` when no global matches.
    pub fn get_global(&self, name: &str) -> Option<GlobalId> {
        self.globals
            .iter()
            .position(|g| g.name == name)
            .map(GlobalId::from_index)
    }

    // ===== Blocks =====

    /// Append a block to `function`'s block list and hand ownership to it.
    pub fn add_block(&mut self, function: FunctionId, mut block: BasicBlock) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        block.parent = Some(function);
        debug!("Added block '{}' as {id} to '{}'", block.name, self.function(function).name);
        self.blocks.push(block);
        self.functions[function.index()].blocks.push(id);
        id
    }

    /// Store a block that no function owns yet.
    pub fn add_detached_block(&mut self, block: BasicBlock) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        debug!("Added detached block '{}' as {id}", block.name);
        self.blocks.push(block);
        id
    }

    /// Hand an existing block to `function`, appending it to that function's
    /// block list. A block owned elsewhere is moved out of its old owner.
    pub fn attach_block(&mut self, function: FunctionId, block: BlockId) {
        match self.blocks[block.index()].parent {
            Some(owner) if owner == function => return,
            Some(owner) => self.functions[owner.index()].blocks.retain(|&b| b != block),
            None => {}
        }
        self.blocks[block.index()].parent = Some(function);
        self.functions[function.index()].blocks.push(block);
        debug!(
            "Attached block '{}' ({block}) to '{}'",
            self.blocks[block.index()].name,
            self.functions[function.index()].name
        );
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.index()]
    }

    /// The last instruction of `block`, if it is a terminator. Earlier
    /// instructions are not inspected.
    pub fn terminator(&self, block: BlockId) -> Option<InstId> {
        self.block(block)
            .last_instruction()
            .filter(|&inst| self.instruction(inst).is_terminator())
    }

    /// Record a control-flow edge. Repeated edges are kept.
    pub(crate) fn add_edge(&mut self, from: BlockId, to: BlockId) {
        self.blocks[from.index()].successors.push(to);
        self.blocks[to.index()].predecessors.push(from);
    }

    // ===== Instructions =====

    /// Append `inst` to the end of `block`.
    pub fn append_instruction(&mut self, block: BlockId, inst: Instruction) -> InstId {
        let position = self.block(block).len();
        self.insert_instruction(block, position, inst)
    }

    /// Place `inst` at `position` in `block`, shifting later instructions.
    pub fn insert_instruction(&mut self, block: BlockId, position: usize, mut inst: Instruction) -> InstId {
        let id = InstId::from_index(self.instructions.len());
        inst.parent = Some(block);
        self.instructions.push(inst);
        self.blocks[block.index()].instructions.insert(position, id);
        id
    }

    pub fn instruction(&self, id: InstId) -> &Instruction {
        &self.instructions[id.index()]
    }

    pub fn instruction_mut(&mut self, id: InstId) -> &mut Instruction {
        &mut self.instructions[id.index()]
    }

    // ===== Values =====

    pub fn argument_value(&self, function: FunctionId, index: usize) -> Value {
        Value::argument(function, index)
    }

    pub fn type_of(&self, value: &Value) -> Type {
        match value {
            Value::Constant(c) => c.ty().clone(),
            Value::Argument { function, index } => self.function(*function).arguments[*index].ty.clone(),
            Value::Global(id) => self.global(*id).ty(),
            Value::Instruction(id) => self.instruction(*id).ty.clone(),
        }
    }

    /// Display name of a value, if it has one. Constants have none.
    pub fn value_name(&self, value: &Value) -> Option<&str> {
        match value {
            Value::Constant(_) => None,
            Value::Argument { function, index } => self.function(*function).arguments[*index].name.as_deref(),
            Value::Global(id) => Some(self.global(*id).name.as_str()),
            Value::Instruction(id) => self.instruction(*id).name.as_deref(),
        }
    }

    // ===== Serialization =====

    pub fn to_json(&self) -> Result<String, IrError> {
        serde_json::to_string_pretty(self).map_err(|e| IrError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, IrError> {
        serde_json::from_str(json).map_err(|e| IrError::Serialization(e.to_string()))
    }
}
