//! NodeArena: flat storage for the token/phrase tree.
//!
//! Nodes are created bottom-up. A phrase is added after all of its children,
//! at which point the children's parent links are filled in. Child lists
//! live in one shared vector and each node records its slice into it.

use super::base::NodeIndex;
use super::phrase::{NodeKind, PhraseKind};
use phz_scanner::{Token, TokenKind};

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    /// Position of this node among its parent's children.
    pub index_in_parent: u32,
    children_start: u32,
    children_len: u32,
}

impl Node {
    #[inline]
    pub fn is_token(&self) -> bool {
        matches!(self.kind, NodeKind::Token(_))
    }

    #[inline]
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self.kind {
            NodeKind::Token(kind) => Some(kind),
            NodeKind::Phrase(_) => None,
        }
    }

    #[inline]
    pub fn phrase_kind(&self) -> Option<PhraseKind> {
        match self.kind {
            NodeKind::Phrase(kind) => Some(kind),
            NodeKind::Token(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    child_indices: Vec<NodeIndex>,
    /// Token nodes in source order, for offset lookups.
    token_nodes: Vec<NodeIndex>,
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for roughly `token_count` tokens.
    /// Phrases add about half again as many nodes as there are tokens.
    pub fn with_capacity(token_count: usize) -> NodeArena {
        let tokens = token_count.min(Self::MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(tokens + tokens / 2),
            child_indices: Vec::with_capacity(tokens + tokens / 2),
            token_nodes: Vec::with_capacity(tokens),
        }
    }

    pub fn add_token(&mut self, token: Token) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind: NodeKind::Token(token.kind),
            pos: token.pos,
            end: token.end,
            parent: NodeIndex::NONE,
            index_in_parent: 0,
            children_start: 0,
            children_len: 0,
        });
        self.token_nodes.push(index);
        index
    }

    /// Add a phrase over already-created children.
    ///
    /// An empty phrase is placed at `empty_pos`.
    pub fn add_phrase(
        &mut self,
        kind: PhraseKind,
        children: &[NodeIndex],
        empty_pos: u32,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let (pos, end) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => {
                (self.nodes[first.0 as usize].pos, self.nodes[last.0 as usize].end)
            }
            _ => (empty_pos, empty_pos),
        };
        let children_start = self.child_indices.len() as u32;
        for (i, child) in children.iter().enumerate() {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = index;
            node.index_in_parent = i as u32;
        }
        self.child_indices.extend_from_slice(children);
        self.nodes.push(Node {
            kind: NodeKind::Phrase(kind),
            pos,
            end,
            parent: NodeIndex::NONE,
            index_in_parent: 0,
            children_start,
            children_len: children.len() as u32,
        });
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Node at a known-valid index (one handed out by this arena).
    #[inline]
    pub(crate) fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0 as usize]
    }

    /// Children of a node, in source order.
    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.get(index) {
            Some(node) => {
                let start = node.children_start as usize;
                &self.child_indices[start..start + node.children_len as usize]
            }
            None => &[],
        }
    }

    /// Token nodes in source order.
    #[inline]
    pub fn tokens(&self) -> &[NodeIndex] {
        &self.token_nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
