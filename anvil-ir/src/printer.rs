//! Textual IR Printer
//!
//! Renders any node of a module to its canonical text. Operands follow a
//! single policy: constants inline by literal (`2`, `3.5`, `null`, `undef`),
//! everything else as a `%name` reference.

use anvil_common::{BlockId, FunctionId, GlobalId, InstId};
use std::fmt;
use crate::instructions::{Callee, InstKind};
use crate::module::Module;
use crate::types::Type;
use crate::values::Value;

const UNNAMED: &str = "<unnamed>";

/// Display adapter for a single instruction
pub struct InstructionDisplay<'m> {
    module: &'m Module,
    id: InstId,
}

/// Display adapter for a basic block
pub struct BlockDisplay<'m> {
    module: &'m Module,
    id: BlockId,
}

/// Display adapter for a function
pub struct FunctionDisplay<'m> {
    module: &'m Module,
    id: FunctionId,
}

/// Display adapter for a global
pub struct GlobalDisplay<'m> {
    module: &'m Module,
    id: GlobalId,
}

impl Module {
    pub fn display_instruction(&self, id: InstId) -> InstructionDisplay<'_> {
        InstructionDisplay { module: self, id }
    }

    pub fn display_block(&self, id: BlockId) -> BlockDisplay<'_> {
        BlockDisplay { module: self, id }
    }

    pub fn display_function(&self, id: FunctionId) -> FunctionDisplay<'_> {
        FunctionDisplay { module: self, id }
    }

    pub fn display_global(&self, id: GlobalId) -> GlobalDisplay<'_> {
        GlobalDisplay { module: self, id }
    }

    /// Operand as it appears inside an instruction.
    pub fn operand_text(&self, value: &Value) -> String {
        match value {
            Value::Constant(c) => c.literal(),
            Value::Argument { function, index } => {
                match &self.function(*function).arguments[*index].name {
                    Some(name) => format!("%{name}"),
                    None => format!("%{index}"),
                }
            }
            _ => format!("%{}", self.value_name(value).unwrap_or(UNNAMED)),
        }
    }

    fn typed_operand(&self, value: &Value) -> String {
        format!("{} {}", self.type_of(value), self.operand_text(value))
    }

    fn typed_list(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|v| self.typed_operand(v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn block_name(&self, id: BlockId) -> &str {
        &self.block(id).name
    }
}

fn join_indices(indices: &[u32]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for InstructionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.module;
        let inst = m.instruction(self.id);
        let result = inst.name.as_deref().unwrap_or(UNNAMED);
        let ty = &inst.ty;

        match &inst.kind {
            InstKind::Ret { value: None } => write!(f, "ret void"),
            InstKind::Ret { value: Some(value) } => write!(f, "ret {}", m.typed_operand(value)),
            InstKind::Br { target } => write!(f, "br label %{}", m.block_name(*target)),
            InstKind::CondBr { condition, then_block, else_block } => write!(
                f,
                "br i1 {}, label %{}, label %{}",
                m.operand_text(condition),
                m.block_name(*then_block),
                m.block_name(*else_block)
            ),
            InstKind::Switch { condition, default, cases } => {
                writeln!(f, "switch {}, label %{} [", m.typed_operand(condition), m.block_name(*default))?;
                for case in cases {
                    writeln!(f, "    {}, label %{}", case.value, m.block_name(case.target))?;
                }
                write!(f, "  ]")
            }
            InstKind::Unreachable => write!(f, "unreachable"),
            InstKind::Binary { op, lhs, rhs, flags } => write!(
                f,
                "%{result} = {op}{flags} {} {}, {}",
                m.type_of(lhs),
                m.operand_text(lhs),
                m.operand_text(rhs)
            ),
            InstKind::Alloca { allocated_type, count, align } => {
                write!(f, "%{result} = alloca {allocated_type}")?;
                if let Some(count) = count {
                    write!(f, ", {}", m.typed_operand(count))?;
                }
                if *align > 0 {
                    write!(f, ", align {align}")?;
                }
                Ok(())
            }
            InstKind::Load { ptr, volatile, align } => {
                let vol = if *volatile { "volatile " } else { "" };
                write!(f, "%{result} = load {vol}{ty}, {}", m.typed_operand(ptr))?;
                if *align > 0 {
                    write!(f, ", align {align}")?;
                }
                Ok(())
            }
            InstKind::Store { value, ptr, volatile, align } => {
                let vol = if *volatile { "volatile " } else { "" };
                write!(f, "store {vol}{}, {}", m.typed_operand(value), m.typed_operand(ptr))?;
                if *align > 0 {
                    write!(f, ", align {align}")?;
                }
                Ok(())
            }
            InstKind::GetElementPtr { source_type, ptr, indices, in_bounds } => {
                let inbounds = if *in_bounds { "inbounds " } else { "" };
                write!(
                    f,
                    "%{result} = getelementptr {inbounds}{source_type}, {}",
                    m.typed_operand(ptr)
                )?;
                if !indices.is_empty() {
                    write!(f, ", {}", m.typed_list(indices))?;
                }
                Ok(())
            }
            InstKind::Cast { op, value, dest_type } => {
                write!(f, "%{result} = {op} {} to {dest_type}", m.typed_operand(value))
            }
            InstKind::ICmp { predicate, lhs, rhs } => write!(
                f,
                "%{result} = icmp {predicate} {} {}, {}",
                m.type_of(lhs),
                m.operand_text(lhs),
                m.operand_text(rhs)
            ),
            InstKind::FCmp { predicate, lhs, rhs } => write!(
                f,
                "%{result} = fcmp {predicate} {} {}, {}",
                m.type_of(lhs),
                m.operand_text(lhs),
                m.operand_text(rhs)
            ),
            InstKind::Phi { incoming } => {
                write!(f, "%{result} = phi {ty}")?;
                for (i, inc) in incoming.iter().enumerate() {
                    let sep = if i > 0 { "," } else { "" };
                    write!(f, "{sep} [ {}, %{} ]", m.operand_text(&inc.value), m.block_name(inc.block))?;
                }
                Ok(())
            }
            InstKind::Select { condition, then_value, else_value } => write!(
                f,
                "%{result} = select i1 {}, {}, {}",
                m.operand_text(condition),
                m.typed_operand(then_value),
                m.typed_operand(else_value)
            ),
            InstKind::Call { callee, args, tail } => {
                let tail = if *tail { "tail " } else { "" };
                let callee = match callee {
                    Callee::Direct(id) => m.function(*id).name.as_str(),
                    Callee::Named(name) => name.as_str(),
                };
                let args = m.typed_list(args);
                // a void call defines nothing, so it gets no result name
                if ty.is_void() {
                    write!(f, "{tail}call void @{callee}({args})")
                } else {
                    write!(f, "%{result} = {tail}call {ty} @{callee}({args})")
                }
            }
            InstKind::ExtractValue { aggregate, indices } => write!(
                f,
                "%{result} = extractvalue {}, {}",
                m.typed_operand(aggregate),
                join_indices(indices)
            ),
            InstKind::InsertValue { aggregate, value, indices } => write!(
                f,
                "%{result} = insertvalue {}, {}, {}",
                m.typed_operand(aggregate),
                m.typed_operand(value),
                join_indices(indices)
            ),
        }
    }
}

impl fmt::Display for BlockDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let block = self.module.block(self.id);
        writeln!(f, "{}:", block.name)?;
        for &inst in &block.instructions {
            writeln!(f, "  {}", self.module.display_instruction(inst))?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = self.module.function(self.id);
        let keyword = if function.is_declaration() { "declare" } else { "define" };

        write!(
            f,
            "{keyword} {} {} @{}(",
            function.linkage,
            function.return_type(),
            function.name
        )?;
        for (i, arg) in function.arguments.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            match &arg.name {
                Some(name) => write!(f, "{} %{name}", arg.ty)?,
                None => write!(f, "{} %{}", arg.ty, arg.index)?,
            }
        }
        if function.signature.variadic {
            if !function.arguments.is_empty() { write!(f, ", ")?; }
            write!(f, "...")?;
        }
        write!(f, ")")?;

        for attr in &function.attributes {
            write!(f, " {attr}")?;
        }

        if !function.is_declaration() {
            writeln!(f, " {{")?;
            for &block in &function.blocks {
                write!(f, "{}", self.module.display_block(block))?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}

impl fmt::Display for GlobalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let global = self.module.global(self.id);
        let kind = if global.is_constant { "constant" } else { "global" };
        write!(f, "@{} = {} {kind} ", global.name, global.linkage)?;
        match &global.initializer {
            Some(init) => write!(f, "{init}"),
            None => write!(f, "{}", global.ty()),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(layout) = &self.data_layout {
            writeln!(f, "target datalayout = \"{layout}\"")?;
        }
        if let Some(triple) = &self.target_triple {
            writeln!(f, "target triple = \"{triple}\"")?;
        }
        if self.data_layout.is_some() || self.target_triple.is_some() {
            writeln!(f)?;
        }

        for (name, ty) in &self.named_types {
            match ty {
                Type::Struct(s) => writeln!(f, "%{name} = type {}", s.body())?,
                other => writeln!(f, "%{name} = type {other}")?,
            }
        }
        if !self.named_types.is_empty() {
            writeln!(f)?;
        }

        let mut has_globals = false;
        for (id, _) in self.globals() {
            writeln!(f, "{}", self.display_global(id))?;
            has_globals = true;
        }
        if has_globals {
            writeln!(f)?;
        }

        for (i, (id, _)) in self.functions().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", self.display_function(id))?;
        }
        Ok(())
    }
}
