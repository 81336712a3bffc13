//! Tests for flattening, matching and key lookup.
use crate::key_access::{flatten, flatten_types, get_key, key_types, matches};
use crate::types::{RecordEntry, Type};

fn record(entries: &[(&str, Type)]) -> Type {
    Type::record(
        entries
            .iter()
            .map(|(k, v)| RecordEntry::new(Type::str(*k), v.clone()))
            .collect(),
    )
}

#[test]
fn flatten_nested_unions() {
    let nested = Type::Mt {
        types: vec![
            Type::int(1),
            Type::Mt {
                types: vec![Type::int(2), Type::Mt { types: vec![Type::int(3)] }],
            },
        ],
    };
    assert_eq!(
        flatten(&nested),
        vec![&Type::int(1), &Type::int(2), &Type::int(3)]
    );
    assert_eq!(
        flatten_types(nested),
        vec![Type::int(1), Type::int(2), Type::int(3)]
    );
    assert_eq!(flatten_types(Type::Any), vec![Type::Any]);
}

#[test]
fn matches_literals_and_names() {
    assert!(matches(&Type::Any, &Type::str("x")));
    assert!(matches(&Type::str("x"), &Type::Any));
    assert!(matches(&Type::str("a"), &Type::str("a")));
    assert!(!matches(&Type::str("a"), &Type::str("b")));
    assert!(matches(&Type::int(3), &Type::int(3)));
    assert!(!matches(&Type::int(3), &Type::str("3")));
    assert!(matches(&Type::fqn("string"), &Type::str("k")));
    assert!(matches(&Type::fqn("\\int"), &Type::int(0)));
    assert!(!matches(&Type::fqn("int"), &Type::str("k")));
    assert!(matches(&Type::fqn("\\App\\User"), &Type::fqn("App\\User")));
    assert!(!matches(&Type::fqn("User"), &Type::fqn("Admin")));
}

#[test]
fn matches_arrays_shallowly() {
    let list = Type::list(Type::fqn("int"));
    let tuple = Type::tuple(vec![Type::int(1)]);
    assert!(matches(&list, &tuple));
    assert!(!matches(&tuple, &list));
    let map = Type::map(Type::fqn("string"), Type::Any);
    assert!(matches(&map, &record(&[("a", Type::Any)])));
    // Same tag, contents ignored.
    assert!(matches(&Type::list(Type::int(1)), &Type::list(Type::str("x"))));
}

#[test]
fn matches_unions_on_either_side() {
    let keys = Type::Mt {
        types: vec![Type::str("a"), Type::str("b")],
    };
    assert!(matches(&keys, &Type::str("b")));
    assert!(matches(&Type::str("a"), &keys));
    assert!(!matches(&keys, &Type::str("c")));
}

#[test]
fn get_key_record_by_literal() {
    let shape = record(&[
        ("a", Type::int(1)),
        ("b", Type::int(2)),
        ("a", Type::int(3)),
    ]);
    assert_eq!(get_key(&shape, &Type::str("a")), vec![Type::int(1), Type::int(3)]);
    assert!(get_key(&shape, &Type::str("z")).is_empty());
    // Non-literal key on a record: nothing.
    assert!(get_key(&shape, &Type::Any).is_empty());
    assert!(get_key(&shape, &Type::fqn("string")).is_empty());
}

#[test]
fn get_key_record_ignores_integer_key() {
    let shape = record(&[("5", Type::str("five"))]);
    assert!(get_key(&shape, &Type::int(5)).is_empty());
    assert_eq!(get_key(&shape, &Type::str("5")), vec![Type::str("five")]);
}

#[test]
fn get_key_tuple() {
    let shape = Type::tuple(vec![Type::str("x"), Type::str("y")]);
    assert_eq!(get_key(&shape, &Type::int(1)), vec![Type::str("y")]);
    assert!(get_key(&shape, &Type::int(2)).is_empty());
    assert!(get_key(&shape, &Type::int(-1)).is_empty());
    assert_eq!(
        get_key(&shape, &Type::Any),
        vec![Type::str("x"), Type::str("y")]
    );
}

#[test]
fn get_key_list_always_yields_value() {
    let shape = Type::list(Type::fqn("int"));
    assert_eq!(get_key(&shape, &Type::int(7)), vec![Type::fqn("int")]);
    assert_eq!(get_key(&shape, &Type::Any), vec![Type::fqn("int")]);
    assert_eq!(get_key(&shape, &Type::str("k")), vec![Type::fqn("int")]);
}

#[test]
fn get_key_map_when_key_matches() {
    let shape = Type::map(Type::fqn("string"), Type::fqn("User"));
    assert_eq!(get_key(&shape, &Type::str("k")), vec![Type::fqn("User")]);
    assert!(get_key(&shape, &Type::int(1)).is_empty());
    assert_eq!(get_key(&shape, &Type::Any), vec![Type::fqn("User")]);

    let by_name = Type::map(Type::str("id"), Type::fqn("int"));
    assert_eq!(get_key(&by_name, &Type::str("id")), vec![Type::fqn("int")]);
    assert!(get_key(&by_name, &Type::str("name")).is_empty());
}

#[test]
fn get_key_flattens_shape_and_key() {
    let shape = Type::Mt {
        types: vec![record(&[("a", Type::int(1))]), record(&[("b", Type::int(2))])],
    };
    let key = Type::Mt {
        types: vec![Type::str("a"), Type::str("b")],
    };
    assert_eq!(get_key(&shape, &key), vec![Type::int(1), Type::int(2)]);
    // Scalars have no keys.
    assert!(get_key(&Type::fqn("string"), &Type::str("a")).is_empty());
    assert!(get_key(&Type::Any, &Type::str("a")).is_empty());
}

#[test]
fn key_types_of_each_shape() {
    let shape = record(&[("id", Type::fqn("int")), ("name", Type::fqn("string"))]);
    assert_eq!(key_types(&shape), vec![Type::str("id"), Type::str("name")]);

    let pair = Type::tuple(vec![Type::fqn("int"), Type::fqn("int")]);
    assert_eq!(key_types(&pair), vec![Type::int(0), Type::int(1)]);

    assert_eq!(key_types(&Type::list(Type::Any)), vec![Type::fqn("int")]);

    let enum_keyed = Type::map(
        Type::Mt {
            types: vec![Type::str("a"), Type::str("b")],
        },
        Type::Any,
    );
    assert_eq!(key_types(&enum_keyed), vec![Type::str("a"), Type::str("b")]);
    assert!(key_types(&Type::fqn("User")).is_empty());
}
