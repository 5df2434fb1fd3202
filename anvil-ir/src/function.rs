//! Function Definitions
//!
//! A function owns its arguments, created one per parameter of its
//! signature, and the ordered list of its blocks. With no blocks it is a
//! declaration; the first block is the entry.

use anvil_common::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::module::Linkage;
use crate::types::{FunctionType, Type};

/// Function argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: Option<String>,
    pub ty: Type,
    pub index: usize,
}

impl Argument {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

/// Function-level attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuncAttribute {
    NoReturn,
    NoUnwind,
    ReadOnly,
    ReadNone,
    AlwaysInline,
    NoInline,
}

impl fmt::Display for FuncAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            FuncAttribute::NoReturn => "noreturn",
            FuncAttribute::NoUnwind => "nounwind",
            FuncAttribute::ReadOnly => "readonly",
            FuncAttribute::ReadNone => "readnone",
            FuncAttribute::AlwaysInline => "alwaysinline",
            FuncAttribute::NoInline => "noinline",
        };
        write!(f, "{keyword}")
    }
}

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub signature: FunctionType,
    pub arguments: Vec<Argument>,
    pub blocks: Vec<BlockId>,
    pub linkage: Linkage,
    /// Kept in insertion order, without repeats
    pub attributes: Vec<FuncAttribute>,
}

impl Function {
    pub fn new(name: impl Into<String>, signature: FunctionType) -> Self {
        let arguments = signature
            .param_types
            .iter()
            .enumerate()
            .map(|(index, ty)| Argument { name: None, ty: ty.clone(), index })
            .collect();

        Self {
            name: name.into(),
            signature,
            arguments,
            blocks: Vec::new(),
            linkage: Linkage::External,
            attributes: Vec::new(),
        }
    }

    pub fn return_type(&self) -> &Type {
        &self.signature.return_type
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        self.blocks.first().copied()
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn argument_mut(&mut self, index: usize) -> Option<&mut Argument> {
        self.arguments.get_mut(index)
    }

    pub fn add_attribute(&mut self, attr: FuncAttribute) {
        if !self.attributes.contains(&attr) {
            self.attributes.push(attr);
        }
    }

    pub fn has_attribute(&self, attr: FuncAttribute) -> bool {
        self.attributes.contains(&attr)
    }
}
