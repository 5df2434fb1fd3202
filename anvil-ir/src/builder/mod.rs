//! IR Builder
//!
//! The builder is the only component that mutates a module's graph once
//! it exists. It keeps an insertion cursor, hands out automatic result
//! names, and records CFG edges as branches are created.
//!
//! ## Insertion cursor
//!
//! In append mode new instructions go to the end of the current block.
//! [`IrBuilder::set_insert_point_before`] switches to positional mode: each
//! insertion lands just before the chosen instruction and the cursor moves
//! past it, so consecutive insertions keep the order they were issued in.
//! Changing the current block always returns to append mode.
//!
//! ## Naming
//!
//! Results created with an empty name get the next value of a counter that
//! belongs to the builder. The counter is not reset between functions, and
//! explicit names are never checked against generated ones.

mod arithmetic;
mod constants;
mod control_flow;
mod conversions;
mod memory;
mod values;

#[cfg(test)]
mod tests;

use anvil_common::{BlockId, FunctionId, GlobalId, InstId, IrError};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use crate::blocks::BasicBlock;
use crate::function::Function;
use crate::instructions::{InstKind, Instruction};
use crate::module::{Global, Linkage, Module};
use crate::types::{FunctionType, Type};
use crate::values::{Constant, Value};

/// Builder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// First value of the automatic naming counter. Hand a finished
    /// builder's [`IrBuilder::next_auto_name`] to the next builder to keep
    /// generated names unique across both.
    pub first_auto_name: u32,
}

/// Builder for constructing IR
#[derive(Debug)]
pub struct IrBuilder {
    module: Module,
    current_function: Option<FunctionId>,
    current_block: Option<BlockId>,
    /// `None` appends; `Some(i)` inserts before position `i`
    insert_point: Option<usize>,
    name_counter: u32,
}

impl IrBuilder {
    /// Builder attached to a fresh, empty module
    pub fn new(module_name: impl Into<String>) -> Self {
        Self::with_module(Module::new(module_name))
    }

    pub fn with_module(module: Module) -> Self {
        Self::with_config(module, BuilderConfig::default())
    }

    pub fn with_config(module: Module, config: BuilderConfig) -> Self {
        Self {
            module,
            current_function: None,
            current_block: None,
            insert_point: None,
            name_counter: config.first_auto_name,
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    /// Detach the module from the builder
    pub fn finish(self) -> Module {
        self.module
    }

    pub fn current_function(&self) -> Option<FunctionId> {
        self.current_function
    }

    pub fn insert_block(&self) -> Option<BlockId> {
        self.current_block
    }

    /// Counter value the next generated name will use
    pub fn next_auto_name(&self) -> u32 {
        self.name_counter
    }

    // ===== Insertion cursor =====

    /// Append subsequent instructions to the end of `block`.
    pub fn set_insert_point(&mut self, block: BlockId) {
        self.current_block = Some(block);
        self.current_function = self.module.block(block).parent();
        self.insert_point = None;
        debug!("Insertion point set to end of '{}'", self.module.block(block).name);
    }

    /// Insert subsequent instructions immediately before `inst`.
    pub fn set_insert_point_before(&mut self, inst: InstId) -> Result<(), IrError> {
        let block = self
            .module
            .instruction(inst)
            .parent()
            .ok_or(IrError::DetachedInstruction(inst))?;
        let position = self
            .module
            .block(block)
            .position_of(inst)
            .ok_or(IrError::DetachedInstruction(inst))?;

        self.current_block = Some(block);
        self.current_function = self.module.block(block).parent();
        self.insert_point = Some(position);
        debug!(
            "Insertion point set before position {position} of '{}'",
            self.module.block(block).name
        );
        Ok(())
    }

    fn require_block(&self) -> BlockId {
        match self.current_block {
            Some(block) => block,
            None => panic!("no insertion block set"),
        }
    }

    fn generate_name(&mut self) -> String {
        let name = self.name_counter.to_string();
        self.name_counter += 1;
        name
    }

    /// Explicit name, or the next generated one when `name` is empty.
    fn result_name(&mut self, name: &str) -> Option<String> {
        if name.is_empty() {
            Some(self.generate_name())
        } else {
            Some(name.to_string())
        }
    }

    /// Place a new instruction at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if no insertion block is set.
    fn insert(&mut self, kind: InstKind, ty: Type, name: Option<String>) -> InstId {
        let block = self.require_block();
        let opcode = kind.opcode();
        let inst = Instruction::new(kind, ty, name);

        let id = match self.insert_point {
            None => self.module.append_instruction(block, inst),
            Some(position) => {
                let id = self.module.insert_instruction(block, position, inst);
                self.insert_point = Some(position + 1);
                id
            }
        };
        trace!("Inserted {opcode} as {id} into '{}'", self.module.block(block).name);
        id
    }

    /// Record the CFG edge `from -> to` on both blocks.
    fn link(&mut self, from: BlockId, to: BlockId) {
        trace!(
            "CFG edge '{}' -> '{}'",
            self.module.block(from).name,
            self.module.block(to).name
        );
        self.module.add_edge(from, to);
    }

    // ===== Functions and globals =====

    /// Create a function in the module and make it the current function.
    pub fn create_function(&mut self, name: &str, return_type: Type, params: Vec<Type>, variadic: bool) -> FunctionId {
        let function = Function::new(name, FunctionType::new(return_type, params, variadic));
        let id = self.module.add_function(function);
        self.current_function = Some(id);
        debug!("Created function '{name}'");
        id
    }

    /// Declare an external function. The current function is unchanged.
    pub fn declare_function(&mut self, name: &str, return_type: Type, params: Vec<Type>, variadic: bool) -> FunctionId {
        let mut function = Function::new(name, FunctionType::new(return_type, params, variadic));
        function.linkage = Linkage::External;
        let id = self.module.add_function(function);
        debug!("Declared function '{name}'");
        id
    }

    pub fn set_arg_name(&mut self, function: FunctionId, index: usize, name: &str) {
        self.module.function_mut(function).arguments[index].set_name(name);
    }

    pub fn arg(&self, function: FunctionId, index: usize) -> Value {
        self.module.argument_value(function, index)
    }

    pub fn create_global_variable(&mut self, name: &str, ty: Type, initializer: Option<Constant>) -> GlobalId {
        self.module.add_global(Global::new(name, ty, initializer))
    }

    /// Constant global whose type is taken from its initializer
    pub fn create_global_constant(&mut self, name: &str, initializer: Constant) -> GlobalId {
        let mut global = Global::new(name, initializer.ty().clone(), Some(initializer));
        global.is_constant = true;
        self.module.add_global(global)
    }

    // ===== Blocks =====

    /// Create a block in the current function. Without a current function
    /// the block is created detached.
    pub fn create_block(&mut self, name: &str) -> BlockId {
        match self.current_function {
            Some(function) => self.create_block_in(function, name),
            None => self.module.add_detached_block(BasicBlock::new(name)),
        }
    }

    pub fn create_block_in(&mut self, function: FunctionId, name: &str) -> BlockId {
        self.module.add_block(function, BasicBlock::new(name))
    }

    /// Give a detached (or foreign) block to `function`. The cursor follows
    /// when it sits in that block.
    pub fn attach_block(&mut self, function: FunctionId, block: BlockId) {
        self.module.attach_block(function, block);
        if self.current_block == Some(block) {
            self.current_function = Some(function);
        }
    }

    pub fn value_type(&self, value: &Value) -> Type {
        self.module.type_of(value)
    }
}
