//! `$shape[key]`: the value types of `key` in every shape of `$shape`.

use super::literal::literal_type;
use crate::context::ResolutionContext;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{Type, get_key};

pub fn resolve<'s>(expr: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(subscript) = expr.as_phrase_of(&[PhraseKind::SubscriptExpression]) else {
        return Vec::new();
    };
    let Some(target) = subscript.nth_child(0) else {
        return Vec::new();
    };
    let key = subscript_key(subscript)
        .and_then(literal_type)
        .unwrap_or(Type::Any);
    ctx.resolve(target)
        .iter()
        .flat_map(|shape| get_key(shape, &key))
        .collect()
}

/// Key expression between the brackets; `None` for `$x[]`.
pub fn subscript_key(subscript: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    subscript
        .significant_children()
        .skip_while(|c| !c.is_token_of(TokenKind::OpenBracket))
        .nth(1)
        .filter(|c| !c.is_token_of(TokenKind::CloseBracket))
}
