//! Problems found in a document's text.
//!
//! Neither the scanner nor the parser ever aborts on bad input: each records
//! a diagnostic and keeps going, so inference still runs over the
//! well-formed parts of a file.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Byte offset of the offending text.
    pub start: u32,
    pub length: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(start: u32, length: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            start,
            length,
            message: message.into(),
        }
    }

    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}
