//! Arena handles
//!
//! Functions, globals, blocks and instructions all live in arenas owned by
//! a module. Everything else refers to them through these opaque indices,
//! so adjacency lists and operand lists never form ownership cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw arena index.
            pub fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the node in its arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

arena_id!(
    /// Handle to a function in a module
    FunctionId,
    "fn"
);
arena_id!(
    /// Handle to a global variable in a module
    GlobalId,
    "global"
);
arena_id!(
    /// Handle to a basic block in a module's block arena
    BlockId,
    "bb"
);
arena_id!(
    /// Handle to an instruction in a module's instruction arena
    InstId,
    "inst"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let id = BlockId::from_index(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id, BlockId::from_index(7));
        assert_ne!(id, BlockId::from_index(8));
    }

    #[test]
    fn test_display() {
        assert_eq!(InstId::from_index(3).to_string(), "inst3");
        assert_eq!(FunctionId::from_index(0).to_string(), "fn0");
        assert_eq!(GlobalId::from_index(2).to_string(), "global2");
        assert_eq!(BlockId::from_index(1).to_string(), "bb1");
    }
}
