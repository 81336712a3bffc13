//! Binder for the phz engine.
//!
//! Binding turns a parsed document into:
//! - `SymbolTable` - functions, class-likes and methods by normalized name
//! - `Reference` - what a call or variable use site refers to
//! - variable scopes, where a variable's declaration is its first
//!   occurrence in the enclosing function (or its parameter)
//!
//! `ProjectStore` holds every document of a project and answers
//! `DeclarationStore` lookups across them.

pub mod symbols;
pub use symbols::{Symbol, SymbolKind, SymbolTable, declared_name, normalize_name};

pub mod state;
pub use state::{BinderState, enclosing_class, enclosing_class_name, enclosing_parent_class_name};

pub mod scope;
pub use scope::{parameters, variable_declaration, variable_scope, variable_tokens_in_scope};

pub mod reference;
pub use reference::{Reference, reference_of};

pub mod store;
pub use store::{DeclarationStore, ProjectStore};

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod store_tests;
