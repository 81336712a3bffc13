//! Keys of a subscripted array: `$arr['<>']` or `$arr[<>`.

use super::key_items;
use crate::adapter::key_candidates;
use crate::completions::{CompletionItem, CompletionRequest};
use phz_checker::ResolutionContext;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};

pub fn provide<'s>(
    request: &CompletionRequest<'s>,
    ctx: &ResolutionContext<'s>,
) -> Vec<CompletionItem> {
    let Some((target, quoted)) = subscript_target(request.token) else {
        return Vec::new();
    };
    let limit = request.options.list_index_suggestions;
    let candidates = ctx
        .resolve(target)
        .iter()
        .flat_map(|ty| key_candidates(ty, limit))
        .collect::<Vec<_>>();
    key_items(candidates, |label| {
        if quoted || is_numeric(&label) {
            label
        } else {
            format!("'{label}'")
        }
    })
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// Subscripted expression and whether the caret is inside quotes.
fn subscript_target(token: SyntaxNode<'_>) -> Option<(SyntaxNode<'_>, bool)> {
    if token.is_token_of(TokenKind::StringLiteral) {
        let subscript = token
            .parent()?
            .as_phrase_of(&[PhraseKind::SubscriptExpression])?;
        let target = subscript.nth_child(0)?;
        return (target != token).then_some((target, true));
    }
    if !token.is_token_of(TokenKind::OpenBracket) {
        return None;
    }
    token
        .parent()?
        .as_phrase_of(&[PhraseKind::SubscriptExpression])?
        .nth_child(0)
        .filter(|target| *target != token)
        .map(|target| (target, false))
}
