//! Parser state: token cursor, tree builder and diagnostics.
//!
//! The tree is built bottom-up on a flat stack of finished nodes. A caller
//! takes a [`checkpoint`](ParserState::checkpoint) before parsing a
//! construct and [`finish`](ParserState::finish)es it afterwards, which wraps
//! everything pushed since the checkpoint into one phrase. Wrapping an
//! already-parsed left operand (binary expressions, subscripts, calls) is the
//! same operation with an older checkpoint.
//!
//! Trivia is buffered and flushed lazily: before the next token is consumed,
//! or when a checkpoint is taken. Trivia in front of a construct therefore
//! lands in the enclosing phrase, which keeps doc comments as the previous
//! sibling of the declaration they document.

use super::base::NodeIndex;
use super::node_arena::NodeArena;
use super::phrase::PhraseKind;
use phz_common::Diagnostic;
use phz_common::limits::MAX_PARSER_DEPTH;
use phz_scanner::{Token, TokenKind};

/// A syntax problem recorded while parsing. Parsing always continues.
pub type ParseDiagnostic = Diagnostic;

pub struct ParserState<'a> {
    pub(crate) source: &'a str,
    tokens: Vec<Token>,
    /// Indices (into `tokens`) of non-trivia tokens.
    significant: Vec<u32>,
    /// Current position in `significant`.
    cursor: usize,
    /// `tokens[..emitted]` have been placed in the tree.
    emitted: usize,
    pub(crate) arena: NodeArena,
    pending: Vec<NodeIndex>,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
    last_error_pos: Option<u32>,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i as u32)
            .collect();
        ParserState {
            source,
            arena: NodeArena::with_capacity(tokens.len()),
            tokens,
            significant,
            cursor: 0,
            emitted: 0,
            pending: Vec::new(),
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
            last_error_pos: None,
        }
    }

    /// Parse a whole script. Returns the root node.
    pub fn parse_script(&mut self) -> NodeIndex {
        let mark = self.checkpoint();
        self.parse_statement_list(|p| p.is_eof());
        // Trailing trivia belongs to the script.
        self.emit_trivia_until(self.tokens.len());
        self.finish(PhraseKind::Script, mark)
    }

    pub fn into_parts(self) -> (NodeArena, Vec<ParseDiagnostic>) {
        (self.arena, self.parse_diagnostics)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn current(&self) -> Option<Token> {
        self.nth(0)
    }

    #[inline]
    pub(crate) fn nth(&self, n: usize) -> Option<Token> {
        self.significant
            .get(self.cursor + n)
            .map(|i| self.tokens[*i as usize])
    }

    #[inline]
    pub(crate) fn token(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    #[inline]
    pub(crate) fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.nth(n).map(|t| t.kind)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: TokenKind) -> bool {
        self.token() == Some(kind)
    }

    #[inline]
    pub(crate) fn nth_is(&self, n: usize, kind: TokenKind) -> bool {
        self.nth_kind(n) == Some(kind)
    }

    /// Keywords are `Name` tokens matched case-insensitively.
    pub(crate) fn nth_is_keyword(&self, n: usize, keyword: &str) -> bool {
        self.nth(n).is_some_and(|t| {
            t.kind == TokenKind::Name && t.text(self.source).eq_ignore_ascii_case(keyword)
        })
    }

    #[inline]
    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        self.nth_is_keyword(0, keyword)
    }

    pub(crate) fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.is_keyword(k))
    }

    /// Position of the current token, or the end of the source.
    pub(crate) fn token_pos(&self) -> u32 {
        self.current()
            .map(|t| t.pos)
            .unwrap_or(self.source.len() as u32)
    }

    /// Cursor position, used to detect that a parse step made no progress.
    #[inline]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    // =========================================================================
    // Tree building
    // =========================================================================

    fn emit_trivia_until(&mut self, target: usize) {
        while self.emitted < target {
            let token = self.tokens[self.emitted];
            let index = self.arena.add_token(token);
            self.pending.push(index);
            self.emitted += 1;
        }
    }

    fn flush_trivia(&mut self) {
        let target = self
            .significant
            .get(self.cursor)
            .map(|i| *i as usize)
            .unwrap_or(self.tokens.len());
        self.emit_trivia_until(target);
    }

    /// Mark the start of a phrase.
    pub(crate) fn checkpoint(&mut self) -> usize {
        self.flush_trivia();
        self.pending.len()
    }

    /// Mark the start of a list phrase. Pending trivia is not flushed, so it
    /// ends up inside the list in front of the first element.
    pub(crate) fn list_checkpoint(&self) -> usize {
        self.pending.len()
    }

    /// Wrap everything pushed since `mark` into a phrase of `kind`.
    pub(crate) fn finish(&mut self, kind: PhraseKind, mark: usize) -> NodeIndex {
        let mark = mark.min(self.pending.len());
        let empty_pos = self.token_pos();
        let index = self
            .arena
            .add_phrase(kind, &self.pending[mark..], empty_pos);
        self.pending.truncate(mark);
        self.pending.push(index);
        index
    }

    /// Consume the current token into the tree.
    pub(crate) fn next_token(&mut self) {
        if self.is_eof() {
            return;
        }
        self.flush_trivia();
        let token = self.tokens[self.emitted];
        let index = self.arena.add_token(token);
        self.pending.push(index);
        self.emitted += 1;
        self.cursor += 1;
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.is_keyword(keyword) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record "`what` expected".
    pub(crate) fn parse_expected(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.parse_error_at_current_token(&format!("'{what}' expected."));
            false
        }
    }

    /// Statement terminator: `;`, or implied by `?>` and end of input.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.eat(TokenKind::Semicolon) || self.is_eof() || self.is_token(TokenKind::CloseTag)
        {
            return;
        }
        self.parse_error_at_current_token("';' expected.");
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str) {
        let (start, length) = self
            .current()
            .map(|t| (t.pos, t.len()))
            .unwrap_or((self.source.len() as u32, 0));
        // One diagnostic per position keeps cascades readable.
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    /// Consume the current token into an `Error` phrase.
    pub(crate) fn error_recovery_skip_token(&mut self, message: &str) {
        self.parse_error_at_current_token(message);
        let mark = self.checkpoint();
        self.next_token();
        self.finish(PhraseKind::Error, mark);
    }

    /// Enter a nested construct. Returns false when the nesting limit is
    /// reached; the caller must then not descend.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_DEPTH {
            self.parse_error_at_current_token("Maximum nesting depth exceeded.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}
