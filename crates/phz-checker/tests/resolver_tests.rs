//! End-to-end resolution tests over small projects.
use crate::context::ResolutionContext;
use phz_binder::ProjectStore;
use phz_parser::{PhraseKind, SyntaxNode};
use phz_solver::{RecordEntry, RecursionProfile, Type};
use std::fmt::Write;

fn project(sources: &[(&str, &str)]) -> ProjectStore {
    let mut store = ProjectStore::new();
    for (uri, text) in sources {
        store.add_source(*uri, *text);
    }
    store
}

/// Last phrase of `kind` in `uri` whose text is `text`.
fn last<'a>(store: &'a ProjectStore, uri: &str, kind: PhraseKind, text: &str) -> SyntaxNode<'a> {
    store
        .document_by_uri(uri)
        .expect("document")
        .root()
        .descendants()
        .filter(|n| n.phrase_kind() == Some(kind) && n.text() == text)
        .last()
        .unwrap_or_else(|| panic!("no {kind:?} `{text}` in {uri}"))
}

fn resolve_last(source: &str, kind: PhraseKind, text: &str) -> Vec<Type> {
    let store = project(&[("a.php", source)]);
    let ctx = ResolutionContext::new(&store);
    ctx.resolve(last(&store, "a.php", kind, text))
}

fn resolve_var(source: &str, name: &str) -> Vec<Type> {
    resolve_last(source, PhraseKind::SimpleVariable, name)
}

fn record(entries: &[(&str, Type)]) -> Type {
    Type::record(
        entries
            .iter()
            .map(|(k, v)| RecordEntry::new(Type::str(*k), v.clone()))
            .collect(),
    )
}

// =============================================================================
// Array literals
// =============================================================================

#[test]
fn array_literal_keyed_is_record() {
    let types = resolve_var("<?php $x = ['a' => 1, 'b' => 'two']; $x;", "$x");
    assert_eq!(
        types,
        vec![record(&[("a", Type::int(1)), ("b", Type::str("two"))])]
    );
}

#[test]
fn array_literal_positional_is_tuple() {
    let types = resolve_var("<?php $x = array(1, 'two'); $x;", "$x");
    assert_eq!(types, vec![Type::tuple(vec![Type::int(1), Type::str("two")])]);
}

#[test]
fn array_literal_mixed_gives_both_shapes() {
    let types = resolve_var("<?php $x = ['a' => 1, 2]; $x;", "$x");
    assert_eq!(
        types,
        vec![record(&[("a", Type::int(1))]), Type::tuple(vec![Type::int(2)])]
    );
}

#[test]
fn array_literal_empty_is_empty_record() {
    assert_eq!(resolve_var("<?php $x = []; $x;", "$x"), vec![record(&[])]);
}

#[test]
fn array_literal_key_coercion() {
    let types = resolve_var("<?php $x = [5 => 'a', $k => 'b']; $x;", "$x");
    assert_eq!(
        types,
        vec![Type::record(vec![
            RecordEntry::new(Type::str("5"), Type::str("a")),
            RecordEntry::new(Type::Any, Type::str("b")),
        ])]
    );
    // Zero-based integer keys collapse to a tuple.
    let types = resolve_var("<?php $x = [0 => 'a', 1 => 'b']; $x;", "$x");
    assert_eq!(types, vec![Type::tuple(vec![Type::str("a"), Type::str("b")])]);
}

#[test]
fn array_literal_unknown_value_is_any_and_nested_values_resolve() {
    let types = resolve_var("<?php $x = ['a' => foo(), 'b' => ['c' => 1]]; $x;", "$x");
    assert_eq!(
        types,
        vec![record(&[
            ("a", Type::Any),
            ("b", record(&[("c", Type::int(1))])),
        ])]
    );
}

#[test]
fn array_literal_spread_merges_records() {
    let types = resolve_var("<?php $a = ['x' => 1]; $b = [...$a, 'y' => 2]; $b;", "$b");
    assert_eq!(types, vec![record(&[("x", Type::int(1)), ("y", Type::int(2))])]);
}

// =============================================================================
// Calls
// =============================================================================

#[test]
fn call_result_through_return_statement() {
    let source = "<?php function f(){ return ['a'=>1,'b'=>2]; } $x = f(); echo $x[''];";
    assert_eq!(
        resolve_var(source, "$x"),
        vec![record(&[("a", Type::int(1)), ("b", Type::int(2))])]
    );
}

#[test]
fn call_result_from_doc_return() {
    let source = "<?php
/** @return array{id: int, name: string} */
function row() {}
$r = row();
$r;";
    assert_eq!(
        resolve_var(source, "$r"),
        vec![record(&[("id", Type::fqn("int")), ("name", Type::fqn("string"))])]
    );
}

#[test]
fn method_call_unions_doc_and_body() {
    let source = "<?php
class A {
    /** @return array{k: string} */
    public function get() { return ['z' => 1]; }
}
$a->get();";
    let types = resolve_last(source, PhraseKind::MethodCallExpression, "$a->get()");
    assert_eq!(
        types,
        vec![record(&[("k", Type::fqn("string"))]), record(&[("z", Type::int(1))])]
    );
}

#[test]
fn static_call_resolves_self() {
    let source = "<?php
class Repo {
    public static function make() { return ['id' => 1]; }
    public function run() { return self::make(); }
}";
    let types = resolve_last(source, PhraseKind::ScopedCallExpression, "self::make()");
    assert_eq!(types, vec![record(&[("id", Type::int(1))])]);
}

#[test]
fn call_across_documents() {
    let store = project(&[
        ("lib.php", "<?php function config() { return ['debug' => true]; }"),
        ("main.php", "<?php $c = config(); $c;"),
    ]);
    let ctx = ResolutionContext::new(&store);
    let types = ctx.resolve(last(&store, "main.php", PhraseKind::SimpleVariable, "$c"));
    assert_eq!(types.len(), 1);
    let Type::RecordArr { entries, .. } = &types[0] else {
        panic!("expected a record, got {types:?}");
    };
    assert_eq!(entries[0].key_type, Type::str("debug"));
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn indexed_assignments_wrap_outward() {
    let source = "<?php $v = []; $v['a'] = 1; $v[] = 'x'; $v['p']['q'] = 2; $v[$i] = 3; echo $v;";
    assert_eq!(
        resolve_var(source, "$v"),
        vec![
            record(&[]),
            Type::map(Type::str("a"), Type::int(1)),
            Type::list(Type::str("x")),
            Type::map(Type::str("p"), Type::map(Type::str("q"), Type::int(2))),
            Type::map(Type::Any, Type::int(3)),
        ]
    );
}

#[test]
fn variable_used_as_key_is_not_assigned() {
    let source = "<?php $k = 'a'; $arr[$k] = 1; echo $k;";
    assert_eq!(resolve_var(source, "$k"), vec![Type::str("a")]);
}

#[test]
fn foreach_value_projects_elements() {
    let source = "<?php
/** @param list<array{id: int}> $rows */
function f($rows) {
    foreach ($rows as $row) {
        echo $row;
    }
}";
    assert_eq!(
        resolve_var(source, "$row"),
        vec![record(&[("id", Type::fqn("int"))])]
    );
}

#[test]
fn foreach_by_reference_value() {
    let source = "<?php $rows = [['a' => 1]]; foreach ($rows as &$row) { $row; }";
    // A one-element positional literal is a tuple; any key reaches it.
    assert_eq!(resolve_var(source, "$row"), vec![record(&[("a", Type::int(1))])]);
}

#[test]
fn foreach_key_binds_record_keys() {
    let source = "<?php $m = ['a' => 1, 'b' => 2]; foreach ($m as $k => $v) { echo $k; }";
    assert_eq!(resolve_var(source, "$k"), vec![Type::str("a"), Type::str("b")]);
}

#[test]
fn variable_scope_stops_at_functions() {
    let source = "<?php
$x = ['outer' => 1];
function f() {
    $x = ['inner' => 1];
    return $x;
}";
    assert_eq!(
        resolve_var(source, "$x"),
        vec![record(&[("inner", Type::int(1))])]
    );
}

// =============================================================================
// Parameters and aliases
// =============================================================================

#[test]
fn parameter_from_method_doc_with_local_alias() {
    let source = "<?php
/** @psalm-type Row = array{id: int} */
class Repo {
    /** @param Row $row */
    public function save($row) {
        echo $row;
    }
}";
    assert_eq!(
        resolve_var(source, "$row"),
        vec![record(&[("id", Type::fqn("int"))])]
    );
}

#[test]
fn parameter_alias_imported_from_other_class() {
    let store = project(&[
        (
            "repo.php",
            "<?php\n/**\n * @psalm-type Id = int\n * @psalm-type Row = array{id: Id}\n */\nclass Repo {}",
        ),
        (
            "service.php",
            "<?php
/** @psalm-import-type Row from Repo as Entry */
class Service {
    /** @param Entry $r */
    public function f($r) { return $r; }
}",
        ),
    ]);
    let ctx = ResolutionContext::new(&store);
    let types = ctx.resolve(last(&store, "service.php", PhraseKind::SimpleVariable, "$r"));
    assert_eq!(types, vec![record(&[("id", Type::fqn("int"))])]);
}

#[test]
fn closure_parameter_uses_statement_doc() {
    let source = "<?php
/** @param array{x: int} $p */
$f = function ($p) { return $p; };";
    assert_eq!(resolve_var(source, "$p"), vec![record(&[("x", Type::fqn("int"))])]);
}

#[test]
fn union_parameter_is_flattened() {
    let source = "<?php
/** @param array{a: int}|array{b: int} $p */
function f($p) { $p; }";
    assert_eq!(
        resolve_var(source, "$p"),
        vec![
            record(&[("a", Type::fqn("int"))]),
            record(&[("b", Type::fqn("int"))]),
        ]
    );
}

#[test]
fn undocumented_parameter_is_unknown() {
    assert!(resolve_var("<?php function f($p) { $p; }", "$p").is_empty());
}

// =============================================================================
// Subscripts
// =============================================================================

#[test]
fn subscript_reads_nested_key() {
    let source = "<?php $x = ['a' => ['b' => 1]]; $y = $x['a']; $y;";
    assert_eq!(resolve_var(source, "$y"), vec![record(&[("b", Type::int(1))])]);
}

#[test]
fn subscript_of_list_param() {
    let source = "<?php
/** @param array{id: int}[] $rows */
function f($rows) { $first = $rows[0]; $first; }";
    assert_eq!(
        resolve_var(source, "$first"),
        vec![record(&[("id", Type::fqn("int"))])]
    );
}

// =============================================================================
// Recursion
// =============================================================================

#[test]
fn self_assignment_terminates() {
    assert!(resolve_var("<?php $a = $a; echo $a;", "$a").is_empty());
}

#[test]
fn call_cycle_resolves_to_nothing() {
    let mut source = String::from("<?php\n");
    for i in 0..60 {
        let next = (i + 1) % 60;
        writeln!(source, "function f{i}() {{ return f{next}(); }}").expect("write");
    }
    source.push_str("f0();\n");
    let types = resolve_last(&source, PhraseKind::FunctionCallExpression, "f0()");
    assert!(types.is_empty(), "{types:?}");
}

#[test]
fn deep_call_chain_resolves() {
    let mut source = String::from("<?php\n");
    for i in 0..100 {
        writeln!(source, "function f{i}() {{ return f{}(); }}", i + 1).expect("write");
    }
    source.push_str("function f100() { return ['k' => 1]; }\nf0();\n");
    let types = resolve_last(&source, PhraseKind::FunctionCallExpression, "f0()");
    assert_eq!(types, vec![record(&[("k", Type::int(1))])]);
}

#[test]
fn depth_limit_yields_nothing() {
    let mut source = String::from("<?php\n");
    for i in 0..40 {
        writeln!(source, "function f{i}() {{ return f{}(); }}", i + 1).expect("write");
    }
    source.push_str("function f40() { return ['k' => 1]; }\nf0();\n");
    let store = project(&[("a.php", source.as_str())]);
    let ctx = ResolutionContext::with_profile(
        &store,
        RecursionProfile::Custom {
            max_depth: 10,
            max_iterations: 10_000,
        },
    );
    let types = ctx.resolve(last(&store, "a.php", PhraseKind::FunctionCallExpression, "f0()"));
    assert!(types.is_empty());
    assert!(ctx.limit_exceeded());
}
