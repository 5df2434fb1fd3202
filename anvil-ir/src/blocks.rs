//! Basic Block Management
//!
//! A block lists its instructions by handle in execution order and keeps
//! explicit predecessor/successor lists. The adjacency lists are maintained
//! by the builder as branches are created; nothing here re-derives them
//! from the terminator.

use anvil_common::{BlockId, FunctionId, InstId};
use serde::{Deserialize, Serialize};

/// Basic Block - a sequence of instructions ending in at most one terminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub name: String,
    pub instructions: Vec<InstId>,
    /// One entry per incoming edge; repeated edges appear repeatedly
    pub predecessors: Vec<BlockId>,
    pub successors: Vec<BlockId>,
    pub(crate) parent: Option<FunctionId>,
}

impl BasicBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: Vec::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
            parent: None,
        }
    }

    pub fn parent(&self) -> Option<FunctionId> {
        self.parent
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn last_instruction(&self) -> Option<InstId> {
        self.instructions.last().copied()
    }

    pub fn position_of(&self, inst: InstId) -> Option<usize> {
        self.instructions.iter().position(|&i| i == inst)
    }

    /// Number of edges from `pred` into this block
    pub fn edge_count_from(&self, pred: BlockId) -> usize {
        self.predecessors.iter().filter(|&&p| p == pred).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_is_empty() {
        let block = BasicBlock::new("entry");
        assert!(block.is_empty());
        assert_eq!(block.len(), 0);
        assert_eq!(block.last_instruction(), None);
        assert_eq!(block.parent(), None);
    }

    #[test]
    fn test_position_and_edge_count() {
        let mut block = BasicBlock::new("merge");
        block.instructions = vec![InstId::from_index(4), InstId::from_index(9)];
        block.predecessors = vec![BlockId::from_index(0), BlockId::from_index(0), BlockId::from_index(2)];

        assert_eq!(block.position_of(InstId::from_index(9)), Some(1));
        assert_eq!(block.position_of(InstId::from_index(1)), None);
        assert_eq!(block.edge_count_from(BlockId::from_index(0)), 2);
        assert_eq!(block.edge_count_from(BlockId::from_index(2)), 1);
        assert_eq!(block.last_instruction(), Some(InstId::from_index(9)));
    }
}
