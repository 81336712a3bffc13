//! Array literals: `[...]` and `array(...)`.
//!
//! Keyed elements build a record and positional elements a tuple. A literal
//! mixing both contributes both shapes. Spread elements (`...$other`) merge
//! the entries of whatever records the spread operand resolves to.

use super::literal::literal_type;
use crate::context::ResolutionContext;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{RecordEntry, Type, normalize_record};

pub fn resolve<'s>(expr: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(array) = expr.as_phrase_of(&[PhraseKind::ArrayCreationExpression]) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut positional = Vec::new();
    let mut has_elements = false;
    for element in elements(array) {
        has_elements = true;
        let value = element.child_of(&[PhraseKind::ArrayValue]);
        if let Some(spread) = value.and_then(spread_operand) {
            for ty in ctx.resolve(spread) {
                if let Type::RecordArr { entries: spread, .. } = ty {
                    entries.extend(spread);
                }
            }
            continue;
        }
        let value_type = value
            .and_then(value_expression)
            .map_or(Type::Any, |v| Type::union(ctx.resolve(v)));
        match element.child_of(&[PhraseKind::ArrayKey]) {
            Some(key) => entries.push(RecordEntry::new(key_type(key), value_type)),
            None => positional.push(value_type),
        }
    }

    if !has_elements {
        return vec![Type::record(Vec::new())];
    }
    let mut shapes = Vec::new();
    if !entries.is_empty() {
        shapes.push(normalize_record(entries, None));
    }
    if !positional.is_empty() {
        shapes.push(Type::tuple(positional));
    }
    shapes
}

/// `ArrayElement`s of an array literal, in source order.
pub fn elements<'s>(array: SyntaxNode<'s>) -> impl Iterator<Item = SyntaxNode<'s>> + 's {
    array
        .child_of(&[PhraseKind::ArrayInitialiserList])
        .into_iter()
        .flat_map(|list| list.children())
        .filter(|c| c.is_phrase_of(&[PhraseKind::ArrayElement]))
}

/// Key of an `ArrayKey`: literal strings as is, integer literals as their
/// decimal string, anything else unknown.
pub fn key_type(key: SyntaxNode<'_>) -> Type {
    match key.nth_child(0).and_then(literal_type) {
        Some(Type::Int { value }) => Type::str(value.to_string()),
        Some(literal) => literal,
        None => Type::Any,
    }
}

/// Expression of an `ArrayValue`, past a by-reference `&`.
pub fn value_expression(value: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    value
        .significant_children()
        .find(|c| !c.is_token_of(TokenKind::Ampersand))
}

fn spread_operand(value: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let mut children = value.significant_children();
    children
        .next()
        .filter(|first| first.is_token_of(TokenKind::Ellipsis))?;
    children.next()
}
