//! Completion providers, one per caret context.

pub mod arr_ctor_key;
pub mod assoc_key;
pub mod custom_doc_tags;
pub mod string_values;

use crate::adapter::KeyCandidate;
use crate::completions::{CompletionItem, CompletionItemKind, CompletionRequest};
use phz_checker::ResolutionContext;
use rustc_hash::FxHashSet;

pub type Provider =
    for<'s> fn(&CompletionRequest<'s>, &ResolutionContext<'s>) -> Vec<CompletionItem>;

/// Providers in the order their items are listed.
pub const PROVIDERS: &[(&str, Provider)] = &[
    ("assoc_key", assoc_key::provide),
    ("arr_ctor_key", arr_ctor_key::provide),
    ("string_values", string_values::provide),
    ("custom_doc_tags", custom_doc_tags::provide),
];

/// Key candidates as `Field` items, first occurrence of each label kept
/// and ranked in order.
fn key_items(
    candidates: impl IntoIterator<Item = KeyCandidate>,
    render: impl Fn(String) -> String,
) -> Vec<CompletionItem> {
    let mut seen = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.label.clone()))
        .enumerate()
        .map(|(rank, c)| {
            CompletionItem::new(render(c.label), CompletionItemKind::Field, rank)
                .with_detail(c.detail)
        })
        .collect()
}
