//! Base index types shared by the arena, the document and the store.

use serde::Serialize;

/// Index of a node in a [`NodeArena`](super::NodeArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

/// Identifies a document inside a project store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocId(pub u32);

/// Project-wide node identity: document plus node index.
///
/// Used as the key of the in-progress set during resolution, so two nodes
/// compare equal exactly when they are the same syntax node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeKey {
    pub doc: DocId,
    pub node: NodeIndex,
}
