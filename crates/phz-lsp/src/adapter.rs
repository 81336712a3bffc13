//! Resolved shapes to candidate key labels.

use phz_solver::{Type, flatten};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCandidate {
    pub label: String,
    /// Position in emission order.
    pub sort_rank: usize,
    /// Rendered value type under this key, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Keys completion offers for `ty`.
///
/// Records give their literal string keys in declared order, lists the
/// first `list_index_suggestions` indices, and maps the literal strings of
/// their key type. Every other shape gives nothing.
pub fn key_candidates(ty: &Type, list_index_suggestions: usize) -> Vec<KeyCandidate> {
    let mut labels: Vec<(String, Option<String>)> = Vec::new();
    for shape in flatten(ty) {
        match shape {
            Type::RecordArr { entries, .. } => {
                labels.extend(entries.iter().filter_map(|entry| {
                    let key = entry.key_type.as_str_literal()?;
                    Some((key.to_string(), Some(entry.value_type.to_string())))
                }));
            }
            Type::ListArr { value_type } => {
                let detail = value_type.to_string();
                labels.extend(
                    (0..list_index_suggestions).map(|i| (i.to_string(), Some(detail.clone()))),
                );
            }
            Type::MapArr {
                key_type,
                value_type,
            } => {
                let detail = value_type.to_string();
                labels.extend(flatten(key_type).into_iter().filter_map(|key| {
                    key.as_str_literal()
                        .map(|key| (key.to_string(), Some(detail.clone())))
                }));
            }
            _ => {}
        }
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(sort_rank, (label, detail))| KeyCandidate {
            label,
            sort_rank,
            detail,
        })
        .collect()
}
