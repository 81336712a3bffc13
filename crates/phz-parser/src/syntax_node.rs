//! `SyntaxNode`: a copyable, navigable handle into a parsed document.
//!
//! Navigation that may find nothing returns `Option`, so lookups chain with
//! `and_then` and stop at the first missing step.

use crate::document::ParsedDocument;
use crate::parser::{Node, NodeIndex, NodeKey, NodeKind, PhraseKind};
use phz_common::limits::MAX_TREE_WALK_ITERATIONS;
use phz_scanner::TokenKind;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    pub(crate) doc: &'a ParsedDocument,
    pub(crate) index: NodeIndex,
}

impl<'a> SyntaxNode<'a> {
    pub fn new(doc: &'a ParsedDocument, index: NodeIndex) -> Option<SyntaxNode<'a>> {
        doc.arena()
            .get(index)
            .map(|_| SyntaxNode { doc, index })
    }

    #[inline]
    fn node(&self) -> &'a Node {
        self.doc.arena().node(self.index)
    }

    #[inline]
    pub fn document(&self) -> &'a ParsedDocument {
        self.doc
    }

    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Project-wide identity of this node.
    #[inline]
    pub fn key(&self) -> NodeKey {
        NodeKey {
            doc: self.doc.id(),
            node: self.index,
        }
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    #[inline]
    pub fn token_kind(&self) -> Option<TokenKind> {
        self.node().token_kind()
    }

    #[inline]
    pub fn phrase_kind(&self) -> Option<PhraseKind> {
        self.node().phrase_kind()
    }

    #[inline]
    pub fn is_token_of(&self, kind: TokenKind) -> bool {
        self.token_kind() == Some(kind)
    }

    #[inline]
    pub fn is_phrase_of(&self, kinds: &[PhraseKind]) -> bool {
        self.phrase_kind().is_some_and(|k| kinds.contains(&k))
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.token_kind().is_some_and(TokenKind::is_trivia)
    }

    pub fn as_token(self) -> Option<SyntaxNode<'a>> {
        self.node().is_token().then_some(self)
    }

    pub fn as_token_of(self, kind: TokenKind) -> Option<SyntaxNode<'a>> {
        self.is_token_of(kind).then_some(self)
    }

    pub fn as_phrase(self) -> Option<SyntaxNode<'a>> {
        (!self.node().is_token()).then_some(self)
    }

    pub fn as_phrase_of(self, kinds: &[PhraseKind]) -> Option<SyntaxNode<'a>> {
        self.is_phrase_of(kinds).then_some(self)
    }

    // =========================================================================
    // Source
    // =========================================================================

    #[inline]
    pub fn pos(&self) -> u32 {
        self.node().pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.node().end
    }

    /// Exact source text covered by this node.
    pub fn text(&self) -> &'a str {
        self.doc
            .text()
            .get(self.pos() as usize..self.end() as usize)
            .unwrap_or("")
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self) -> Option<SyntaxNode<'a>> {
        SyntaxNode::new(self.doc, self.node().parent)
    }

    /// Parent, grandparent, ... up to the script.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'a>> + use<'a> {
        std::iter::successors(self.parent(), |n| n.parent()).take(MAX_TREE_WALK_ITERATIONS)
    }

    /// All children in source order, trivia included.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'a>> + use<'a> {
        let doc = self.doc;
        doc.arena()
            .children(self.index)
            .iter()
            .map(move |index| SyntaxNode { doc, index: *index })
    }

    /// Children without whitespace and comments.
    pub fn significant_children(&self) -> impl Iterator<Item = SyntaxNode<'a>> + use<'a> {
        self.children().filter(|c| !c.is_trivia())
    }

    /// The `n`-th non-trivia child.
    pub fn nth_child(&self, n: usize) -> Option<SyntaxNode<'a>> {
        self.significant_children().nth(n)
    }

    /// First child phrase of one of `kinds`.
    pub fn child_of(&self, kinds: &[PhraseKind]) -> Option<SyntaxNode<'a>> {
        self.children().find(|c| c.is_phrase_of(kinds))
    }

    /// First child token of `kind`.
    pub fn child_token(&self, kind: TokenKind) -> Option<SyntaxNode<'a>> {
        self.children().find(|c| c.is_token_of(kind))
    }

    fn sibling_at(&self, offset: isize) -> Option<SyntaxNode<'a>> {
        let parent = self.node().parent;
        if parent.is_none() {
            return None;
        }
        let siblings = self.doc.arena().children(parent);
        let at = (self.node().index_in_parent as isize).checked_add(offset)?;
        let index = *siblings.get(usize::try_from(at).ok()?)?;
        Some(SyntaxNode {
            doc: self.doc,
            index,
        })
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'a>> {
        self.sibling_at(1)
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'a>> {
        self.sibling_at(-1)
    }

    /// Nearest following sibling satisfying `pred`.
    pub fn next_sibling_where(
        &self,
        pred: impl Fn(&SyntaxNode<'a>) -> bool,
    ) -> Option<SyntaxNode<'a>> {
        std::iter::successors(self.next_sibling(), |n| n.next_sibling()).find(|n| pred(n))
    }

    /// Nearest preceding sibling satisfying `pred`.
    pub fn prev_sibling_where(
        &self,
        pred: impl Fn(&SyntaxNode<'a>) -> bool,
    ) -> Option<SyntaxNode<'a>> {
        std::iter::successors(self.prev_sibling(), |n| n.prev_sibling()).find(|n| pred(n))
    }

    /// Pre-order walk of this node and everything below it.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants { stack: vec![*self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<SyntaxNode<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let doc = node.doc;
        self.stack.extend(
            doc.arena()
                .children(node.index)
                .iter()
                .rev()
                .map(|index| SyntaxNode { doc, index: *index }),
        );
        Some(node)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl Hash for SyntaxNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Token(kind) => write!(f, "{kind:?}@{}..{}", self.pos(), self.end()),
            NodeKind::Phrase(kind) => write!(f, "{kind:?}@{}..{}", self.pos(), self.end()),
        }
    }
}
