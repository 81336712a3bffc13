//! Completion entry point.
//!
//! Given a document and a caret offset, every provider inspects the token
//! under the caret and contributes items for the context it recognizes.
//! Providers resolve through one shared `ResolutionContext` per request.

use crate::providers::PROVIDERS;
use phz_binder::DeclarationStore;
use phz_checker::ResolutionContext;
use phz_common::limits::{DEFAULT_LIST_INDEX_SUGGESTIONS, SORT_TEXT_WIDTH};
use phz_parser::SyntaxNode;
use serde::Serialize;
use tracing::{debug, trace};

/// Detail shown next to items whose value type is unknown.
pub const DEFAULT_DETAIL: &str = "phz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionItemKind {
    /// An array key
    Field,
    /// A string value
    Value,
    /// A docblock tag
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    pub detail: String,
    /// Emission rank, zero-padded so it sorts as text.
    pub sort_text: String,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionItemKind, rank: usize) -> Self {
        CompletionItem {
            label: label.into(),
            kind,
            detail: DEFAULT_DETAIL.to_string(),
            sort_text: sort_text(rank),
        }
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        if let Some(detail) = detail {
            self.detail = detail;
        }
        self
    }
}

pub fn sort_text(rank: usize) -> String {
    format!("{rank:0width$}", width = SORT_TEXT_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Indices offered for list-shaped arrays.
    pub list_index_suggestions: usize,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        CompletionOptions {
            list_index_suggestions: DEFAULT_LIST_INDEX_SUGGESTIONS,
        }
    }
}

/// What a provider sees: the token under the caret and the caret itself.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'s> {
    pub token: SyntaxNode<'s>,
    pub offset: u32,
    pub options: CompletionOptions,
}

/// Completion items at `offset` in document `uri`.
pub fn complete(
    store: &dyn DeclarationStore,
    uri: &str,
    offset: u32,
    options: &CompletionOptions,
) -> Vec<CompletionItem> {
    let ctx = ResolutionContext::new(store);
    let Some(token) = ctx.locate(uri, offset) else {
        debug!(uri, offset, "no token at caret");
        return Vec::new();
    };
    debug!(uri, offset, ?token, "completion request");

    let request = CompletionRequest {
        token,
        offset,
        options: *options,
    };
    let mut items = Vec::new();
    for (name, provider) in PROVIDERS {
        let found = provider(&request, &ctx);
        if !found.is_empty() {
            trace!(provider = *name, count = found.len(), "provider matched");
        }
        items.extend(found);
    }
    items
}
