//! Scanner implementation.
//!
//! Produces the full token stream of a document, trivia included. Scanning
//! never fails: malformed input (unterminated strings and comments, stray
//! bytes) yields a best-effort token plus a diagnostic.

use crate::token::{Token, TokenKind};
use memchr::memmem;
use phz_common::Diagnostic;

/// Tokens and diagnostics of one document.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan a whole document.
pub fn scan(source: &str) -> ScanResult {
    Scanner::new(source).scan_all()
}

const CAST_TYPES: &[&str] = &[
    "int", "integer", "bool", "boolean", "float", "double", "real", "string", "array", "object",
    "unset", "binary",
];

pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    in_php: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            bytes: source.as_bytes(),
            pos: 0,
            in_php: false,
            tokens: Vec::with_capacity(source.len() / 4),
            diagnostics: Vec::new(),
        }
    }

    pub fn scan_all(mut self) -> ScanResult {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let kind = if self.in_php {
                self.scan_php_token()
            } else {
                self.scan_inline_html()
            };
            debug_assert!(self.pos > start, "scanner made no progress at {start}");
            if self.pos <= start {
                self.pos = start + self.char_len(start);
            }
            self.tokens
                .push(Token::new(kind, start as u32, self.pos as u32));
        }
        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[inline]
    fn peek(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    #[inline]
    fn starts_with(&self, s: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(s)
    }

    #[inline]
    fn op(&mut self, len: usize, kind: TokenKind) -> TokenKind {
        self.pos += len;
        kind
    }

    /// Byte length of the UTF-8 character starting at `at`.
    fn char_len(&self, at: usize) -> usize {
        match self.bytes.get(at) {
            Some(b) if *b < 0x80 => 1,
            Some(b) if *b >= 0xf0 => 4,
            Some(b) if *b >= 0xe0 => 3,
            Some(b) if *b >= 0xc0 => 2,
            _ => 1,
        }
        .min(self.bytes.len().saturating_sub(at).max(1))
    }

    fn error(&mut self, start: usize, message: &str) {
        self.diagnostics.push(Diagnostic::new(
            start as u32,
            (self.pos - start) as u32,
            message,
        ));
    }

    fn skip_ident(&mut self) {
        while self.pos < self.bytes.len() && is_ident_part(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    // =========================================================================
    // Markup
    // =========================================================================

    fn scan_inline_html(&mut self) -> TokenKind {
        if self.starts_with(b"<?") {
            let after = &self.bytes[self.pos + 2..];
            if after.len() >= 3
                && after[..3].eq_ignore_ascii_case(b"php")
                && after.get(3).is_none_or(|b| is_whitespace(*b))
            {
                self.in_php = true;
                return self.op(5, TokenKind::OpenTag);
            }
            if after.first() == Some(&b'=') {
                self.in_php = true;
                return self.op(3, TokenKind::OpenTagWithEcho);
            }
            self.in_php = true;
            return self.op(2, TokenKind::OpenTag);
        }
        match memmem::find(&self.bytes[self.pos..], b"<?") {
            Some(rel) => self.pos += rel,
            None => self.pos = self.bytes.len(),
        }
        TokenKind::InlineHtml
    }

    // =========================================================================
    // PHP code
    // =========================================================================

    fn scan_php_token(&mut self) -> TokenKind {
        let c = self.peek(0);
        match c {
            _ if is_whitespace(c) => {
                while self.pos < self.bytes.len() && is_whitespace(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                TokenKind::Whitespace
            }
            b'#' if self.peek(1) == b'[' => self.scan_attribute(),
            b'#' => self.scan_line_comment(),
            b'/' => match self.peek(1) {
                b'/' => self.scan_line_comment(),
                b'*' => self.scan_block_comment(),
                b'=' => self.op(2, TokenKind::CompoundAssignment),
                _ => self.op(1, TokenKind::Slash),
            },
            b'?' => match self.peek(1) {
                b'>' => {
                    self.pos += 2;
                    if self.starts_with(b"\r\n") {
                        self.pos += 2;
                    } else if self.peek(0) == b'\n' {
                        self.pos += 1;
                    }
                    self.in_php = false;
                    TokenKind::CloseTag
                }
                b'-' if self.peek(2) == b'>' => self.op(3, TokenKind::NullsafeArrow),
                b'?' if self.peek(2) == b'=' => self.op(3, TokenKind::CompoundAssignment),
                b'?' => self.op(2, TokenKind::QuestionQuestion),
                _ => self.op(1, TokenKind::Question),
            },
            b'$' => {
                if is_ident_start(self.peek(1)) {
                    self.pos += 1;
                    self.skip_ident();
                    TokenKind::VariableName
                } else {
                    self.op(1, TokenKind::Dollar)
                }
            }
            b'\'' | b'"' => self.scan_string(c),
            b'`' => self.op(1, TokenKind::Backtick),
            b'0'..=b'9' => self.scan_number(),
            b'.' => {
                if self.peek(1).is_ascii_digit() {
                    self.scan_number()
                } else if self.starts_with(b"...") {
                    self.op(3, TokenKind::Ellipsis)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::CompoundAssignment)
                } else {
                    self.op(1, TokenKind::Dot)
                }
            }
            b'\\' if is_ident_start(self.peek(1)) => self.scan_name(),
            _ if is_ident_start(c) => self.scan_name(),
            b'(' => self.scan_cast().unwrap_or_else(|| self.op(1, TokenKind::OpenParen)),
            b')' => self.op(1, TokenKind::CloseParen),
            b'[' => self.op(1, TokenKind::OpenBracket),
            b']' => self.op(1, TokenKind::CloseBracket),
            b'{' => self.op(1, TokenKind::OpenBrace),
            b'}' => self.op(1, TokenKind::CloseBrace),
            b';' => self.op(1, TokenKind::Semicolon),
            b',' => self.op(1, TokenKind::Comma),
            b'~' => self.op(1, TokenKind::Tilde),
            b'@' => self.op(1, TokenKind::At),
            b':' if self.peek(1) == b':' => self.op(2, TokenKind::ColonColon),
            b':' => self.op(1, TokenKind::Colon),
            b'-' => match self.peek(1) {
                b'>' => self.op(2, TokenKind::Arrow),
                b'-' => self.op(2, TokenKind::MinusMinus),
                b'=' => self.op(2, TokenKind::CompoundAssignment),
                _ => self.op(1, TokenKind::Minus),
            },
            b'+' => match self.peek(1) {
                b'+' => self.op(2, TokenKind::PlusPlus),
                b'=' => self.op(2, TokenKind::CompoundAssignment),
                _ => self.op(1, TokenKind::Plus),
            },
            b'*' => {
                if self.starts_with(b"**=") {
                    self.op(3, TokenKind::CompoundAssignment)
                } else if self.peek(1) == b'*' {
                    self.op(2, TokenKind::AsteriskAsterisk)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::CompoundAssignment)
                } else {
                    self.op(1, TokenKind::Asterisk)
                }
            }
            b'%' if self.peek(1) == b'=' => self.op(2, TokenKind::CompoundAssignment),
            b'%' => self.op(1, TokenKind::Percent),
            b'=' => {
                if self.starts_with(b"===") {
                    self.op(3, TokenKind::EqualsEqualsEquals)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::EqualsEquals)
                } else if self.peek(1) == b'>' {
                    self.op(2, TokenKind::FatArrow)
                } else {
                    self.op(1, TokenKind::Equals)
                }
            }
            b'!' => {
                if self.starts_with(b"!==") {
                    self.op(3, TokenKind::ExclamationEqualsEquals)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::ExclamationEquals)
                } else {
                    self.op(1, TokenKind::Exclamation)
                }
            }
            b'<' => {
                if self.starts_with(b"<<<")
                    && let Some(kind) = self.scan_heredoc()
                {
                    kind
                } else if self.starts_with(b"<=>") {
                    self.op(3, TokenKind::Spaceship)
                } else if self.starts_with(b"<<=") {
                    self.op(3, TokenKind::CompoundAssignment)
                } else if self.peek(1) == b'<' {
                    self.op(2, TokenKind::LessThanLessThan)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::LessThanEquals)
                } else if self.peek(1) == b'>' {
                    self.op(2, TokenKind::ExclamationEquals)
                } else {
                    self.op(1, TokenKind::LessThan)
                }
            }
            b'>' => {
                if self.starts_with(b">>=") {
                    self.op(3, TokenKind::CompoundAssignment)
                } else if self.peek(1) == b'>' {
                    self.op(2, TokenKind::GreaterThanGreaterThan)
                } else if self.peek(1) == b'=' {
                    self.op(2, TokenKind::GreaterThanEquals)
                } else {
                    self.op(1, TokenKind::GreaterThan)
                }
            }
            b'&' => match self.peek(1) {
                b'&' => self.op(2, TokenKind::AmpersandAmpersand),
                b'=' => self.op(2, TokenKind::CompoundAssignment),
                _ => self.op(1, TokenKind::Ampersand),
            },
            b'|' => match self.peek(1) {
                b'|' => self.op(2, TokenKind::BarBar),
                b'=' => self.op(2, TokenKind::CompoundAssignment),
                _ => self.op(1, TokenKind::Bar),
            },
            b'^' if self.peek(1) == b'=' => self.op(2, TokenKind::CompoundAssignment),
            b'^' => self.op(1, TokenKind::Caret),
            _ => {
                let start = self.pos;
                self.pos += self.char_len(start);
                self.error(start, "Unexpected character.");
                TokenKind::Unknown
            }
        }
    }

    fn scan_name(&mut self) -> TokenKind {
        if self.peek(0) == b'\\' {
            self.pos += 1;
        }
        loop {
            self.skip_ident();
            if self.peek(0) == b'\\' && is_ident_start(self.peek(1)) {
                self.pos += 1;
                continue;
            }
            break;
        }
        TokenKind::Name
    }

    fn scan_line_comment(&mut self) -> TokenKind {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == b'\n' || b == b'\r' || self.starts_with(b"?>") {
                break;
            }
            self.pos += 1;
        }
        TokenKind::Comment
    }

    fn scan_block_comment(&mut self) -> TokenKind {
        let start = self.pos;
        let is_doc = self.starts_with(b"/**") && is_whitespace(self.peek(3));
        match memmem::find(&self.bytes[self.pos + 2..], b"*/") {
            Some(rel) => self.pos += 2 + rel + 2,
            None => {
                self.pos = self.bytes.len();
                self.error(start, "'*/' expected.");
            }
        }
        if is_doc {
            TokenKind::DocumentComment
        } else {
            TokenKind::Comment
        }
    }

    /// `#[...]` attribute groups are kept as comment trivia.
    fn scan_attribute(&mut self) -> TokenKind {
        let start = self.pos;
        self.pos += 2;
        let mut depth = 1u32;
        while self.pos < self.bytes.len() && depth > 0 {
            match self.bytes[self.pos] {
                b'[' => depth += 1,
                b']' => depth -= 1,
                q @ (b'\'' | b'"') => {
                    self.scan_string(q);
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }
        if depth > 0 {
            self.error(start, "']' expected.");
        }
        TokenKind::Comment
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == b'\\' {
                self.pos = (self.pos + 2).min(self.bytes.len());
                continue;
            }
            self.pos += 1;
            if b == quote {
                return TokenKind::StringLiteral;
            }
        }
        // Unterminated: recover at the end of the opening line so the rest of
        // the document still tokenizes normally.
        self.pos = memchr::memchr2(b'\n', b'\r', &self.bytes[start..])
            .map(|rel| start + rel)
            .unwrap_or(self.bytes.len())
            .max(start + 1);
        self.error(start, "Unterminated string literal.");
        TokenKind::StringLiteral
    }

    fn scan_number(&mut self) -> TokenKind {
        let bytes = self.bytes;
        let radix_digits = |b: u8, radix: u8| match radix {
            16 => b.is_ascii_hexdigit() || b == b'_',
            8 => (b'0'..=b'7').contains(&b) || b == b'_',
            _ => b == b'0' || b == b'1' || b == b'_',
        };
        if self.peek(0) == b'0' {
            let radix = match self.peek(1) {
                b'x' | b'X' => Some(16),
                b'o' | b'O' => Some(8),
                b'b' | b'B' => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 2;
                while self.pos < bytes.len() && radix_digits(bytes[self.pos], radix) {
                    self.pos += 1;
                }
                return TokenKind::IntegerLiteral;
            }
        }

        let mut kind = TokenKind::IntegerLiteral;
        let digits = |s: &mut Self| {
            while s.pos < bytes.len() && (bytes[s.pos].is_ascii_digit() || bytes[s.pos] == b'_') {
                s.pos += 1;
            }
        };
        digits(self);
        if self.peek(0) == b'.' && self.peek(1).is_ascii_digit() {
            kind = TokenKind::FloatingLiteral;
            self.pos += 1;
            digits(self);
        }
        if matches!(self.peek(0), b'e' | b'E') {
            let sign = usize::from(matches!(self.peek(1), b'+' | b'-'));
            if self.peek(1 + sign).is_ascii_digit() {
                kind = TokenKind::FloatingLiteral;
                self.pos += 1 + sign;
                digits(self);
            }
        }
        kind
    }

    /// `(int)`, `(string)`, ... with optional inner spaces.
    fn scan_cast(&mut self) -> Option<TokenKind> {
        let mut p = self.pos + 1;
        let skip_blanks = |mut p: usize| {
            while p < self.bytes.len() && matches!(self.bytes[p], b' ' | b'\t') {
                p += 1;
            }
            p
        };
        p = skip_blanks(p);
        let word_start = p;
        while p < self.bytes.len() && self.bytes[p].is_ascii_alphabetic() {
            p += 1;
        }
        let word = std::str::from_utf8(&self.bytes[word_start..p]).ok()?;
        p = skip_blanks(p);
        if self.bytes.get(p) != Some(&b')') {
            return None;
        }
        if !CAST_TYPES.iter().any(|t| t.eq_ignore_ascii_case(word)) {
            return None;
        }
        self.pos = p + 1;
        Some(TokenKind::CastOperator)
    }

    /// `<<<ID ... ID` and `<<<'ID' ... ID`.
    fn scan_heredoc(&mut self) -> Option<TokenKind> {
        let start = self.pos;
        let bytes = self.bytes;
        let mut p = start + 3;
        while p < bytes.len() && matches!(bytes[p], b' ' | b'\t') {
            p += 1;
        }
        let quote = bytes.get(p).copied().filter(|b| *b == b'\'' || *b == b'"');
        if quote.is_some() {
            p += 1;
        }
        let label_start = p;
        if !bytes.get(p).is_some_and(|b| is_ident_start(*b)) {
            return None;
        }
        while p < bytes.len() && is_ident_part(bytes[p]) {
            p += 1;
        }
        let label = &bytes[label_start..p];
        if let Some(q) = quote {
            if bytes.get(p) != Some(&q) {
                return None;
            }
            p += 1;
        }
        if !matches!(bytes.get(p), Some(b'\n' | b'\r')) {
            return None;
        }

        let mut line = p;
        while let Some(rel) = memchr::memchr(b'\n', &bytes[line..]) {
            let mut q = line + rel + 1;
            while q < bytes.len() && matches!(bytes[q], b' ' | b'\t') {
                q += 1;
            }
            if bytes[q..].starts_with(label)
                && !bytes
                    .get(q + label.len())
                    .is_some_and(|b| is_ident_part(*b))
            {
                self.pos = q + label.len();
                return Some(TokenKind::Heredoc);
            }
            line = q;
        }
        self.pos = bytes.len();
        self.error(start, "Unterminated heredoc.");
        Some(TokenKind::Heredoc)
    }
}
