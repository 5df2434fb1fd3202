use anvil_common::{BlockId, InstId, IrError};
use super::IrBuilder;
use crate::instructions::{InstKind, SwitchCase};
use crate::types::Type;
use crate::values::{Constant, Value};

impl IrBuilder {
    /// Creates a return instruction with a value
    pub fn create_ret(&mut self, value: impl Into<Value>) -> InstId {
        self.insert(InstKind::Ret { value: Some(value.into()) }, Type::Void, None)
    }

    pub fn create_ret_void(&mut self) -> InstId {
        self.insert(InstKind::Ret { value: None }, Type::Void, None)
    }

    /// Creates an unconditional branch and records the edge to `target`.
    pub fn create_br(&mut self, target: BlockId) -> InstId {
        let from = self.require_block();
        let inst = self.insert(InstKind::Br { target }, Type::Void, None);
        self.link(from, target);
        inst
    }

    /// Creates a two-way branch and records both edges, `then_block` first.
    pub fn create_cond_br(&mut self, condition: impl Into<Value>, then_block: BlockId, else_block: BlockId) -> InstId {
        let from = self.require_block();
        let kind = InstKind::CondBr {
            condition: condition.into(),
            then_block,
            else_block,
        };
        let inst = self.insert(kind, Type::Void, None);
        self.link(from, then_block);
        self.link(from, else_block);
        inst
    }

    /// Creates a switch with no cases yet; see [`IrBuilder::add_case`].
    pub fn create_switch(&mut self, condition: impl Into<Value>, default: BlockId) -> InstId {
        let from = self.require_block();
        let kind = InstKind::Switch {
            condition: condition.into(),
            default,
            cases: Vec::new(),
        };
        let inst = self.insert(kind, Type::Void, None);
        self.link(from, default);
        inst
    }

    /// Append a case to `switch` and record the edge from the block that
    /// holds it. Cases targeting the same block add one edge each.
    pub fn add_case(&mut self, switch: InstId, value: Constant, target: BlockId) -> Result<(), IrError> {
        let inst = self.module.instruction_mut(switch);
        let cases = inst.switch_cases_mut().ok_or(IrError::NotASwitch(switch))?;
        cases.push(SwitchCase { value, target });

        if let Some(from) = inst.parent() {
            self.link(from, target);
        }
        Ok(())
    }

    pub fn create_unreachable(&mut self) -> InstId {
        self.insert(InstKind::Unreachable, Type::Void, None)
    }
}
