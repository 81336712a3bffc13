//! Shape normalization.

use crate::types::{RecordEntry, Type};

/// Generic names psalm treats as plain arrays.
const ARRAY_LIKE: &[&str] = &["array", "non-empty-array"];
const LIST_LIKE: &[&str] = &["list", "non-empty-list"];

/// `array<T>` is a list of `T`, `array<K, V>` a map from `K` to `V`.
///
/// `list<T>` and the `non-empty-` variants follow the same rule. Other
/// names and arities are kept as `Fqn`.
pub fn normalize_fqn_type(fqn: String, mut generics: Vec<Type>) -> Type {
    let name = fqn.strip_prefix('\\').unwrap_or(&fqn);
    let is_array = ARRAY_LIKE.iter().any(|n| name.eq_ignore_ascii_case(n));
    let is_list = LIST_LIKE.iter().any(|n| name.eq_ignore_ascii_case(n));
    match generics.len() {
        1 if is_array || is_list => Type::list(generics.swap_remove(0)),
        2 if is_array => {
            let value = generics.swap_remove(1);
            let key = generics.swap_remove(0);
            Type::map(key, value)
        }
        _ => Type::Fqn { fqn, generics },
    }
}

/// A non-empty record keyed exactly `"0"`, `"1"`, ... in order is a tuple.
pub fn normalize_record(entries: Vec<RecordEntry>, unparsed: Option<String>) -> Type {
    let ordered = !entries.is_empty()
        && entries.iter().enumerate().all(|(i, entry)| {
            entry
                .key_type
                .as_str_literal()
                .is_some_and(|key| key == i.to_string())
        });
    if ordered {
        Type::tuple(entries.into_iter().map(|e| e.value_type).collect())
    } else {
        Type::RecordArr { entries, unparsed }
    }
}
