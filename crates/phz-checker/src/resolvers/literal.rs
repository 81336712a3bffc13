//! String and integer literal tokens.

use crate::context::ResolutionContext;
use phz_parser::{SyntaxNode, TokenKind};
use phz_solver::Type;

pub fn resolve<'s>(expr: SyntaxNode<'s>, _ctx: &ResolutionContext<'s>) -> Vec<Type> {
    literal_type(expr).into_iter().collect()
}

/// `Str` or `Int` of a literal token. Interpolated strings and integers
/// that overflow to floats are not literals.
pub fn literal_type(node: SyntaxNode<'_>) -> Option<Type> {
    match node.token_kind()? {
        TokenKind::StringLiteral => unquote(node.text()).map(Type::str),
        TokenKind::IntegerLiteral => parse_int(node.text()).map(Type::int),
        _ => None,
    }
}

/// Content of a quoted PHP string literal with escapes applied.
pub fn unquote(text: &str) -> Option<String> {
    if text.len() < 2 {
        return None;
    }
    if let Some(body) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        return Some(unescape_single(body));
    }
    if let Some(body) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return unescape_double(body);
    }
    None
}

fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(&next @ ('\\' | '\'')) = chars.peek()
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

fn is_variable_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

/// `None` when the string interpolates a variable.
fn unescape_double(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '$' if chars.peek().is_some_and(|c| is_variable_start(*c)) => return None,
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match next {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'v' => out.push('\u{0b}'),
                    'e' => out.push('\u{1b}'),
                    'f' => out.push('\u{0c}'),
                    '\\' | '$' | '"' => out.push(next),
                    '0'..='7' => {
                        let mut digits = String::from(next);
                        while digits.len() < 3
                            && let Some(d @ '0'..='7') = chars.peek().copied()
                        {
                            digits.push(d);
                            chars.next();
                        }
                        let code = u32::from_str_radix(&digits, 8).ok()? & 0xff;
                        out.push(char::from_u32(code)?);
                    }
                    'x' if chars.peek().is_some_and(char::is_ascii_hexdigit) => {
                        let mut digits = String::new();
                        while digits.len() < 2
                            && let Some(d) = chars.peek().copied().filter(char::is_ascii_hexdigit)
                        {
                            digits.push(d);
                            chars.next();
                        }
                        out.push(char::from_u32(u32::from_str_radix(&digits, 16).ok()?)?);
                    }
                    'u' if chars.peek() == Some(&'{') => {
                        chars.next();
                        let digits: String = chars.by_ref().take_while(|c| *c != '}').collect();
                        out.push(char::from_u32(u32::from_str_radix(&digits, 16).ok()?)?);
                    }
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            _ => out.push(ch),
        }
    }
    Some(out)
}

/// Decimal, `0x`, `0b`, `0o` and legacy `0`-prefixed octal integers with
/// `_` separators.
pub fn parse_int(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (8, oct)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    i64::from_str_radix(body, radix).ok()
}
