//! Common types and utilities for the phz PHP shape inference engine.
//!
//! - `limits` - thresholds shared by the front end and completion
//! - `position` - byte offset to line/column conversion
//! - `diagnostics` - problems recorded by the scanner and parser

pub mod limits;

pub mod position;
pub use position::{LineMap, Position};

pub mod diagnostics;
pub use diagnostics::Diagnostic;

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
