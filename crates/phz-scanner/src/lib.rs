//! PHP scanner/tokenizer for the phz engine.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - Token types, including trivia (whitespace, comments)
//! - `Token` - A kind plus its byte span
//! - `Scanner` - Tokenizer state machine over one document

pub mod token;
pub use token::{Token, TokenKind};

pub mod scanner_impl;
pub use scanner_impl::{ScanResult, Scanner, scan};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
