//! Docblock tags editors do not know: `/** @<> */`.

use crate::completions::{CompletionItem, CompletionItemKind, CompletionRequest};
use phz_checker::ResolutionContext;
use phz_parser::TokenKind;

pub const CUSTOM_DOC_TAGS: &[&str] = &["psalm-type", "psalm-import-type"];

pub fn provide<'s>(
    request: &CompletionRequest<'s>,
    _ctx: &ResolutionContext<'s>,
) -> Vec<CompletionItem> {
    let token = request.token;
    if !token.is_token_of(TokenKind::DocumentComment) {
        return Vec::new();
    }
    let before_caret = request
        .offset
        .checked_sub(token.pos())
        .and_then(|len| token.text().get(..len as usize));
    if !before_caret.is_some_and(|text| text.ends_with('@')) {
        return Vec::new();
    }
    CUSTOM_DOC_TAGS
        .iter()
        .enumerate()
        .map(|(rank, tag)| CompletionItem::new(*tag, CompletionItemKind::Keyword, rank))
        .collect()
}
