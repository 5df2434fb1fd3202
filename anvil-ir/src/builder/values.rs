use anvil_common::{BlockId, FunctionId, InstId, IrError};
use super::IrBuilder;
use crate::instructions::{Callee, InstKind, PhiIncoming};
use crate::types::Type;
use crate::values::Value;

impl IrBuilder {
    // ===== Phi and select =====

    /// Creates a phi node with no incoming values
    pub fn create_phi(&mut self, ty: Type, name: &str) -> InstId {
        let name = self.result_name(name);
        self.insert(InstKind::Phi { incoming: Vec::new() }, ty, name)
    }

    /// Append an incoming `(value, block)` pair to `phi`.
    pub fn add_incoming(&mut self, phi: InstId, value: impl Into<Value>, block: BlockId) -> Result<(), IrError> {
        let incoming = self
            .module
            .instruction_mut(phi)
            .phi_incoming_mut()
            .ok_or(IrError::NotAPhi(phi))?;
        incoming.push(PhiIncoming { value: value.into(), block });
        Ok(())
    }

    /// Result has the type of `then_value`
    pub fn create_select(
        &mut self,
        condition: impl Into<Value>,
        then_value: impl Into<Value>,
        else_value: impl Into<Value>,
        name: &str,
    ) -> InstId {
        let then_value = then_value.into();
        let ty = self.module.type_of(&then_value);
        let name = self.result_name(name);
        let kind = InstKind::Select {
            condition: condition.into(),
            then_value,
            else_value: else_value.into(),
        };
        self.insert(kind, ty, name)
    }

    // ===== Calls =====

    /// Direct call. A void call only gets a name when one is given.
    pub fn create_call(&mut self, function: FunctionId, args: Vec<Value>, name: &str) -> InstId {
        self.call(function, args, false, name)
    }

    pub fn create_tail_call(&mut self, function: FunctionId, args: Vec<Value>, name: &str) -> InstId {
        self.call(function, args, true, name)
    }

    fn call(&mut self, function: FunctionId, args: Vec<Value>, tail: bool, name: &str) -> InstId {
        let return_type = self.module.function(function).return_type().clone();
        self.emit_call(Callee::Direct(function), return_type, args, tail, name)
    }

    /// Call to a symbol the module need not contain. The caller supplies
    /// the return type.
    pub fn create_call_by_name(&mut self, callee: &str, return_type: Type, args: Vec<Value>, name: &str) -> InstId {
        self.emit_call(Callee::Named(callee.to_string()), return_type, args, false, name)
    }

    /// Look `name` up among the module's functions.
    pub fn resolve_callee(&self, name: &str) -> Result<Callee, IrError> {
        self.module
            .get_function(name)
            .map(Callee::Direct)
            .ok_or_else(|| IrError::UnknownFunction(name.to_string()))
    }

    fn emit_call(&mut self, callee: Callee, return_type: Type, args: Vec<Value>, tail: bool, name: &str) -> InstId {
        let name = if name.is_empty() && return_type.is_void() {
            None
        } else {
            self.result_name(name)
        };
        self.insert(InstKind::Call { callee, args, tail }, return_type, name)
    }

    // ===== Aggregates =====

    /// Result type is the aggregate's own type, not the selected member's.
    pub fn create_extract_value(&mut self, aggregate: impl Into<Value>, indices: Vec<u32>, name: &str) -> InstId {
        let aggregate = aggregate.into();
        let ty = self.module.type_of(&aggregate);
        let name = self.result_name(name);
        self.insert(InstKind::ExtractValue { aggregate, indices }, ty, name)
    }

    pub fn create_insert_value(
        &mut self,
        aggregate: impl Into<Value>,
        value: impl Into<Value>,
        indices: Vec<u32>,
        name: &str,
    ) -> InstId {
        let aggregate = aggregate.into();
        let ty = self.module.type_of(&aggregate);
        let name = self.result_name(name);
        let kind = InstKind::InsertValue { aggregate, value: value.into(), indices };
        self.insert(kind, ty, name)
    }
}
