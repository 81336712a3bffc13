//! Line/column positions.
//!
//! The syntax tree addresses text by byte offset; editors and the CLI speak
//! in lines and UTF-16 columns. `LineMap` converts between the two.

use serde::{Deserialize, Serialize};

/// 0-based line and UTF-16 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Byte offset of every line start. `\n`, `\r\n` and a lone `\r` each end
/// a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut starts = vec![0];
        starts.extend(
            memchr::memchr2_iter(b'\n', b'\r', bytes)
                .filter(|&i| !(bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n')))
                .map(|i| (i + 1) as u32),
        );
        LineMap { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line containing `offset`.
    fn line_of(&self, offset: u32) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Text of `line` without its terminator.
    fn line_text<'s>(&self, line: usize, source: &'s str) -> Option<&'s str> {
        let start = *self.starts.get(line)? as usize;
        let end = self
            .starts
            .get(line + 1)
            .map_or(source.len(), |&next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    /// Offsets past the end clamp to the end of the text.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let offset = offset.min(source.len() as u32);
        let line = self.line_of(offset);
        let start = self.starts[line] as usize;
        let character = source
            .get(start..offset as usize)
            .map_or(0, |prefix| prefix.encode_utf16().count() as u32);
        Position::new(line as u32, character)
    }

    /// `None` past the last line. Columns past the end of a line clamp to
    /// its end; a column inside a surrogate pair stops before the pair.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line = position.line as usize;
        let text = self.line_text(line, source)?;
        let mut units = 0u32;
        let mut bytes = 0usize;
        for ch in text.chars() {
            let next = units + ch.len_utf16() as u32;
            if next > position.character {
                break;
            }
            units = next;
            bytes += ch.len_utf8();
        }
        Some(self.starts[line] + bytes as u32)
    }
}
