//! A parsed PHP document: source, tree, line map and diagnostics.

use crate::parser::{DocId, NodeArena, NodeIndex, ParseDiagnostic, ParserState};
use crate::syntax_node::SyntaxNode;
use phz_common::LineMap;
use tracing::trace;

pub struct ParsedDocument {
    id: DocId,
    uri: String,
    text: String,
    arena: NodeArena,
    root: NodeIndex,
    line_map: LineMap,
    diagnostics: Vec<ParseDiagnostic>,
}

impl ParsedDocument {
    /// Scan and parse `text`. Never fails; problems become diagnostics.
    pub fn parse(uri: impl Into<String>, text: impl Into<String>) -> ParsedDocument {
        let uri = uri.into();
        let text = text.into();

        let scanned = phz_scanner::scan(&text);
        let mut diagnostics = scanned.diagnostics;

        let mut parser = ParserState::new(&text, scanned.tokens);
        let root = parser.parse_script();
        let (arena, parse_diagnostics) = parser.into_parts();

        diagnostics.extend(parse_diagnostics);
        diagnostics.sort_by_key(|d| d.start);

        let line_map = LineMap::build(&text);
        trace!(
            uri = %uri,
            nodes = arena.len(),
            diagnostics = diagnostics.len(),
            "parsed document"
        );

        ParsedDocument {
            id: DocId::default(),
            uri,
            text,
            arena,
            root,
            line_map,
            diagnostics,
        }
    }

    #[inline]
    pub fn id(&self) -> DocId {
        self.id
    }

    /// Assigned by the store that owns the document.
    pub fn set_id(&mut self, id: DocId) {
        self.id = id;
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[inline]
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    #[inline]
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// The `Script` node.
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            doc: self,
            index: self.root,
        }
    }

    pub fn node(&self, index: NodeIndex) -> Option<SyntaxNode<'_>> {
        SyntaxNode::new(self, index)
    }

    /// Token the caret at `offset` sits in or right after:
    /// the token with `pos < offset <= end`, or the first token at offset 0.
    pub fn token_at(&self, offset: u32) -> Option<SyntaxNode<'_>> {
        let tokens = self.arena.tokens();
        if offset == 0 {
            return tokens.first().and_then(|index| self.node(*index));
        }
        let at = tokens.partition_point(|index| self.arena.node(*index).end < offset);
        let index = *tokens.get(at)?;
        let node = self.arena.node(index);
        (node.pos < offset && offset <= node.end).then(|| SyntaxNode { doc: self, index })
    }
}

/// Convenience wrapper around [`ParsedDocument::parse`].
pub fn parse_document(uri: impl Into<String>, text: impl Into<String>) -> ParsedDocument {
    ParsedDocument::parse(uri, text)
}
