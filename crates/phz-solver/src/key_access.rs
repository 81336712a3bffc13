//! Union flattening, shallow type matching and key lookup.

use crate::types::Type;
use std::mem;

/// Expand nested unions into their leaf alternatives.
pub fn flatten(ty: &Type) -> Vec<&Type> {
    let mut out = Vec::new();
    flatten_into(ty, &mut out);
    out
}

fn flatten_into<'t>(ty: &'t Type, out: &mut Vec<&'t Type>) {
    match ty {
        Type::Mt { types } => types.iter().for_each(|t| flatten_into(t, out)),
        other => out.push(other),
    }
}

/// Owned variant of [`flatten`].
pub fn flatten_types(ty: Type) -> Vec<Type> {
    match ty {
        Type::Mt { types } => types.into_iter().flat_map(flatten_types).collect(),
        other => vec![other],
    }
}

fn strip_root(fqn: &str) -> &str {
    fqn.strip_prefix('\\').unwrap_or(fqn)
}

/// Shallow compatibility of two non-union types. Only used for key
/// typing, so arrays, objects and generics are not compared deeply.
fn matches_flat(expected: &Type, used: &Type) -> bool {
    match (expected, used) {
        (Type::Any, _) | (_, Type::Any) => true,
        (Type::Str { content: a }, Type::Str { content: b }) => a == b,
        (Type::Int { value: a }, Type::Int { value: b }) => a == b,
        (Type::ListArr { .. }, Type::TupleArr { .. }) => true,
        (Type::MapArr { .. }, Type::RecordArr { .. }) => true,
        (Type::Fqn { fqn, .. }, Type::Str { .. }) if strip_root(fqn) == "string" => true,
        (Type::Fqn { fqn, .. }, Type::Int { .. }) if strip_root(fqn) == "int" => true,
        (Type::Fqn { fqn: a, .. }, Type::Fqn { fqn: b, .. }) => strip_root(a) == strip_root(b),
        _ => mem::discriminant(expected) == mem::discriminant(used),
    }
}

/// Whether any alternative of `used` matches any alternative of `expected`.
pub fn matches(expected: &Type, used: &Type) -> bool {
    let used = flatten(used);
    flatten(expected)
        .into_iter()
        .any(|e| used.iter().any(|u| matches_flat(e, u)))
}

/// Value types reachable by indexing `shape` with `key`.
pub fn get_key(shape: &Type, key: &Type) -> Vec<Type> {
    let keys = flatten(key);
    let mut values = Vec::new();
    for shape in flatten(shape) {
        for key in &keys {
            lookup_flat(shape, key, &mut values);
        }
    }
    values
}

fn lookup_flat(shape: &Type, key: &Type, values: &mut Vec<Type>) {
    match shape {
        Type::RecordArr { entries, .. } => {
            let Type::Str { content: name } = key else {
                return;
            };
            values.extend(
                entries
                    .iter()
                    .filter(|e| e.key_type.as_str_literal() == Some(name.as_str()))
                    .map(|e| e.value_type.clone()),
            );
        }
        Type::TupleArr { elements } => match key {
            Type::Int { value } => {
                if let Some(element) = usize::try_from(*value).ok().and_then(|i| elements.get(i)) {
                    values.push(element.clone());
                }
            }
            _ => values.extend(elements.iter().cloned()),
        },
        Type::ListArr { value_type } => values.push((**value_type).clone()),
        Type::MapArr {
            key_type,
            value_type,
        } => {
            if matches(key_type, key) {
                values.push((**value_type).clone());
            }
        }
        _ => {}
    }
}

/// Key types a `foreach` over `shape` binds: record keys, map key types
/// and tuple indices. List keys are `int`.
pub fn key_types(shape: &Type) -> Vec<Type> {
    let mut keys = Vec::new();
    for shape in flatten(shape) {
        match shape {
            Type::RecordArr { entries, .. } => {
                keys.extend(entries.iter().map(|e| e.key_type.clone()));
            }
            Type::TupleArr { elements } => {
                keys.extend((0..elements.len() as i64).map(Type::int));
            }
            Type::ListArr { .. } => keys.push(Type::fqn("int")),
            Type::MapArr { key_type, .. } => {
                keys.extend(flatten(key_type).into_iter().cloned());
            }
            _ => {}
        }
    }
    keys
}
