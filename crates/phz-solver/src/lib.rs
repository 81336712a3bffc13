//! Shape solver for PHP associative arrays.
//!
//! This crate holds the pure leaves of inference:
//!
//! - **`Type`**: tagged-union lattice of literal, array and named shapes
//! - **Normalization**: `array<...>` generics and `"0".."n-1"` records
//! - **Docblocks**: comment cleaning, raw tags, `@param`/`@return`, aliases
//!   and the psalm type-expression parser
//! - **Key access**: union flattening, shallow matching and `get_key`
//! - **Recursion guard**: cycle and depth limits shared by resolvers
//!
//! Nothing here touches syntax trees; the checker feeds it text and shapes.

pub mod docblock;
pub mod key_access;
pub mod normalize;
pub mod recursion;
pub mod types;

pub use docblock::{
    FuncDocInfo, ImportedTypeAlias, ParsedTypeExpr, RawDocTag, TypeAlias, doc_comment_tags,
    doc_comment_text, imported_type_aliases, parse_type_expr, raw_tags, substitute_aliases,
    type_aliases,
};
pub use key_access::{flatten, flatten_types, get_key, key_types, matches};
pub use normalize::{normalize_fqn_type, normalize_record};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use types::{RecordEntry, Type};

#[cfg(test)]
#[path = "../tests/type_expr_tests.rs"]
mod type_expr_tests;

#[cfg(test)]
#[path = "../tests/docblock_tests.rs"]
mod docblock_tests;

#[cfg(test)]
#[path = "../tests/key_access_tests.rs"]
mod key_access_tests;

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
