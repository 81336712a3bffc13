//! phz: associative-array shape inference for PHP.
//!
//! The engine lives in the workspace crates, re-exported here under short
//! names:
//! - `parser` - scanner and error-tolerant PHP parser
//! - `binder` - symbol tables and the project store
//! - `solver` - the type lattice and docblock types
//! - `checker` - backward shape resolution
//! - `lsp` - key candidates and completion providers
//!
//! The `cli` module drives all of them over files on disk.

pub use phz_binder as binder;
pub use phz_checker as checker;
pub use phz_common as common;
pub use phz_lsp as lsp;
pub use phz_parser as parser;
pub use phz_solver as solver;

pub mod cli;

// Tracing configuration (PHZ_LOG / PHZ_LOG_FORMAT)
pub mod tracing_config;
