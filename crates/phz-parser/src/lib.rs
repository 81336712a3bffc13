//! Error-tolerant PHP parser for the phz engine.
//!
//! This crate provides:
//! - `NodeArena` - flat storage of token and phrase nodes
//! - `ParserState` - recursive-descent parser building the arena bottom-up
//! - `ParsedDocument` - source text, tree, line map and diagnostics
//! - `SyntaxNode` - copyable navigation handle with identity equality

pub mod parser;
pub use parser::{
    DocId, Node, NodeArena, NodeIndex, NodeKey, NodeKind, ParseDiagnostic, ParserState,
    PhraseKind,
};

pub mod document;
pub use document::{ParsedDocument, parse_document};

pub mod syntax_node;
pub use syntax_node::{Descendants, SyntaxNode};

pub use phz_scanner::TokenKind;

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/syntax_node_tests.rs"]
mod syntax_node_tests;
