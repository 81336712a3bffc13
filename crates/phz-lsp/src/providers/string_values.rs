//! String values a compared expression may hold: `$type === '<>'`.

use crate::completions::{CompletionItem, CompletionItemKind, CompletionRequest};
use phz_checker::ResolutionContext;
use phz_parser::{PhraseKind, TokenKind};
use phz_solver::{Type, flatten_types};
use rustc_hash::FxHashSet;

pub fn provide<'s>(
    request: &CompletionRequest<'s>,
    ctx: &ResolutionContext<'s>,
) -> Vec<CompletionItem> {
    let token = request.token;
    if !token.is_token_of(TokenKind::StringLiteral) {
        return Vec::new();
    }
    let Some(comparison) = token
        .parent()
        .and_then(|p| p.as_phrase_of(&[PhraseKind::EqualityExpression]))
        .filter(|c| c.child_token(TokenKind::Spaceship).is_none())
    else {
        return Vec::new();
    };

    let mut seen = FxHashSet::default();
    comparison
        .significant_children()
        .filter(|operand| *operand != token && operand.as_phrase().is_some())
        .flat_map(|operand| ctx.resolve(operand))
        .flat_map(flatten_types)
        .filter_map(|ty| match ty {
            Type::Str { content } => Some(content),
            _ => None,
        })
        .filter(|content| seen.insert(content.clone()))
        .enumerate()
        .map(|(rank, content)| CompletionItem::new(content, CompletionItemKind::Value, rank))
        .collect()
}
