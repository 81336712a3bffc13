//! Shape resolution for PHP expressions.
//!
//! This crate is organized into several submodules:
//! - `context` - `ResolutionContext`, the recursion-guarded entry point
//! - `resolvers` - one strategy per expression form (literal, array
//!   literal, call, variable, subscript) plus parameter docblocks
//! - `docs` - docblocks attached to declarations and `@psalm-type` scopes
//! - `scope_finder` - `return` statements and variable references of a
//!   function body
//!
//! Resolution is backward: given an expression, find every place its value
//! may come from and union what those places say. Nothing is cached; each
//! request builds a fresh context.

pub mod context;
pub use context::ResolutionContext;

pub mod docs;
pub use docs::{AliasScope, doc_comment_of, function_body, function_doc};

pub mod resolvers;

pub mod scope_finder;
pub use scope_finder::{find_returns, find_var_refs};

#[cfg(test)]
#[path = "../tests/literal_tests.rs"]
mod literal_tests;

#[cfg(test)]
#[path = "../tests/scope_finder_tests.rs"]
mod scope_finder_tests;

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "../tests/docs_tests.rs"]
mod docs_tests;
