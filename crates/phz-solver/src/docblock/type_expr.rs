//! Recursive-descent parser for psalm/phpstan docblock type expressions.
//!
//! Grammar, first matching alternative wins:
//!
//! ```text
//! multi   := single ('|' single)*
//! single  := base ('[]')*
//! base    := '?' single
//!          | name '<' multi (',' multi)* '>'
//!          | 'array' '{' (key ':' multi ',')* '}'
//!          | name
//!          | quoted-string
//! ```
//!
//! Whitespace and `//` line comments are skipped between tokens. The parser
//! never fails loudly: malformed input yields `None`, and whatever was not
//! consumed is returned as `text_left` (callers read e.g. the `$name` that
//! follows a `@param` type from it).

use crate::normalize::{normalize_fqn_type, normalize_record};
use crate::types::{RecordEntry, Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTypeExpr {
    pub ty: Type,
    /// Unconsumed remainder of the input.
    pub text_left: String,
}

/// Parse the leading type expression of `text`.
pub fn parse_type_expr(text: &str) -> Option<ParsedTypeExpr> {
    let mut parser = TypeExprParser::new(text);
    let ty = parser.parse_multi_value()?;
    Some(ParsedTypeExpr {
        ty,
        text_left: parser.rest().to_string(),
    })
}

struct TypeExprParser<'a> {
    text: &'a str,
    offset: usize,
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '\\'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '\\'
}

impl<'a> TypeExprParser<'a> {
    fn new(text: &'a str) -> Self {
        TypeExprParser { text, offset: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.offset += ch.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.offset += rest.len() - rest.trim_start().len();
    }

    /// Whitespace and `//` comments running to the end of their line.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            match rest.find('\n') {
                Some(eol) if rest.starts_with("//") => self.offset += eol + 1,
                _ => return,
            }
        }
    }

    /// `\s* ch \s*`, all or nothing.
    fn eat_punct(&mut self, ch: char) -> bool {
        let start = self.offset;
        self.skip_whitespace();
        if self.peek() == Some(ch) {
            self.bump(ch);
            self.skip_whitespace();
            true
        } else {
            self.offset = start;
            false
        }
    }

    /// Identifier with optional namespace separators. Inner dashes are
    /// allowed for psalm pseudo types such as `non-empty-list`.
    fn eat_name(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices().peekable();
        match chars.next() {
            Some((_, ch)) if is_name_start(ch) => {}
            _ => return None,
        }
        let mut end = rest.len();
        while let Some((i, ch)) = chars.next() {
            if is_name_char(ch) {
                continue;
            }
            if ch == '-' && chars.peek().is_some_and(|(_, next)| next.is_ascii_alphabetic()) {
                continue;
            }
            end = i;
            break;
        }
        self.offset += end;
        Some(&rest[..end])
    }

    /// Record key: a bare word or a quoted string, then `?`, then `:`.
    fn eat_record_key(&mut self) -> Option<String> {
        let start = self.offset;
        self.skip_trivia();
        let key = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump(quote);
                self.parse_string(quote)
            }
            _ => {
                let rest = self.rest();
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                (len > 0).then(|| {
                    self.offset += len;
                    rest[..len].to_string()
                })
            }
        };
        let Some(key) = key else {
            self.offset = start;
            return None;
        };
        self.skip_whitespace();
        if self.peek() == Some('?') {
            self.bump('?');
        }
        if !self.eat_punct(':') {
            self.offset = start;
            return None;
        }
        Some(key)
    }

    /// Body of a quoted string after its opening quote. Backslash escapes
    /// the next character. `None` when unterminated.
    fn parse_string(&mut self, quote: char) -> Option<String> {
        let mut content = String::new();
        let mut escape = false;
        while let Some(ch) = self.peek() {
            self.bump(ch);
            if escape {
                content.push(ch);
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == quote {
                return Some(content);
            } else {
                content.push(ch);
            }
        }
        None
    }

    /// Consume up to the bracket closing an already opened `open`,
    /// returning what was skipped. Quoted strings are skipped whole.
    fn skip_till_closed(&mut self, open: char, close: char) -> String {
        let start = self.offset;
        let mut level = 1;
        while let Some(ch) = self.peek() {
            if ch == close {
                level -= 1;
                if level == 0 {
                    let closed = self.text[start..self.offset].to_string();
                    self.bump(ch);
                    return closed;
                }
            } else if ch == open {
                level += 1;
            } else if ch == '\'' || ch == '"' {
                self.bump(ch);
                self.parse_string(ch);
                continue;
            }
            self.bump(ch);
        }
        let closed = self.text[start..].to_string();
        self.offset = self.text.len();
        closed
    }

    fn parse_type_list(&mut self) -> Option<Vec<Type>> {
        let mut types = Vec::new();
        loop {
            types.push(self.parse_multi_value()?);
            if !self.eat_punct(',') {
                return Some(types);
            }
        }
    }

    /// Entries of `array{...}` after the opening brace.
    fn parse_assoc_keys(&mut self) -> Type {
        let mut entries = Vec::new();
        while let Some(key) = self.eat_record_key() {
            let Some(value) = self.parse_multi_value() else {
                break;
            };
            entries.push(RecordEntry::new(Type::str(key), value));
            if !self.eat_punct(',') {
                break;
            }
        }
        // Optional trailing comma.
        self.eat_punct(',');
        if self.eat_punct('}') {
            normalize_record(entries, None)
        } else {
            let unparsed = self.skip_till_closed('{', '}');
            normalize_record(entries, Some(unparsed))
        }
    }

    fn parse_single_value(&mut self) -> Option<Type> {
        self.skip_trivia();
        let start = self.offset;
        let parsed = self.parse_single_value_at();
        if parsed.is_some() && self.offset == start {
            debug_assert!(
                self.rest().is_empty(),
                "type expression rule consumed nothing on {:?}",
                self.rest().chars().take(20).collect::<String>()
            );
            return None;
        }
        parsed.map(|ty| self.parse_list_suffix(ty))
    }

    /// `T[][]...`
    fn parse_list_suffix(&mut self, mut ty: Type) -> Type {
        let start = self.offset;
        self.skip_whitespace();
        let mut wrapped = false;
        while self.rest().starts_with("[]") {
            self.offset += 2;
            ty = Type::list(ty);
            wrapped = true;
        }
        if wrapped {
            self.skip_whitespace();
        } else {
            self.offset = start;
        }
        ty
    }

    fn parse_single_value_at(&mut self) -> Option<Type> {
        if self.peek() == Some('?') {
            self.bump('?');
            let inner = self.parse_single_value()?;
            return Some(Type::Mt {
                types: vec![inner, Type::fqn("null")],
            });
        }
        if let Some(quote @ ('\'' | '"')) = self.peek() {
            self.bump(quote);
            let content = self.parse_string(quote)?;
            self.skip_whitespace();
            return Some(Type::str(content));
        }

        let name = self.eat_name()?;
        let after_name = self.offset;

        // Name<T1, T2, ...>
        if self.eat_punct('<') {
            let generics = self.parse_type_list()?;
            if !self.eat_punct('>') {
                return None;
            }
            return Some(normalize_fqn_type(name.to_string(), generics));
        }

        // array{...}, whitespace allowed before the brace
        if name == "array" {
            self.skip_whitespace();
            if self.peek() == Some('{') {
                self.bump('{');
                self.skip_whitespace();
                return Some(self.parse_assoc_keys());
            }
        }

        self.offset = after_name;
        self.skip_whitespace();
        Some(Type::fqn(name))
    }

    fn parse_multi_value(&mut self) -> Option<Type> {
        let mut alternatives = vec![self.parse_single_value()?];
        while self.eat_punct('|') {
            match self.parse_single_value() {
                Some(next) => alternatives.push(next),
                None => break,
            }
        }
        Some(Type::union(alternatives))
    }
}
