//! Completion layer of the phz engine.
//!
//! This crate provides:
//! - `adapter` - candidate key labels of a resolved shape
//! - `completions` - `CompletionItem` and the `complete` entry point
//! - `providers` - the caret contexts completion understands: array keys,
//!   array literal keys passed as arguments, compared string values and
//!   custom docblock tags

pub mod adapter;
pub use adapter::{KeyCandidate, key_candidates};

pub mod completions;
pub use completions::{
    CompletionItem, CompletionItemKind, CompletionOptions, CompletionRequest, complete,
};

pub mod providers;

#[cfg(test)]
#[path = "../tests/adapter_tests.rs"]
mod adapter_tests;

#[cfg(test)]
#[path = "../tests/completion_tests.rs"]
mod completion_tests;
