//! Tests for symbol binding, references and variable scopes.
use crate::reference::{Reference, reference_of};
use crate::scope::{variable_declaration, variable_scope};
use crate::state::BinderState;
use crate::symbols::{SymbolKind, normalize_name};
use phz_parser::{ParsedDocument, PhraseKind, SyntaxNode, TokenKind};

fn parse(source: &str) -> ParsedDocument {
    ParsedDocument::parse("test.php", source)
}

fn find<'a>(doc: &'a ParsedDocument, kind: PhraseKind) -> SyntaxNode<'a> {
    doc.root()
        .descendants()
        .find(|n| n.phrase_kind() == Some(kind))
        .unwrap_or_else(|| panic!("no {kind:?} in tree"))
}

/// Every `$name` token spelled `name`, in source order.
fn variables<'a>(doc: &'a ParsedDocument, name: &str) -> Vec<SyntaxNode<'a>> {
    doc.root()
        .descendants()
        .filter(|n| n.is_token_of(TokenKind::VariableName) && n.text() == name)
        .collect()
}

#[test]
fn normalize_name_strips_namespace_and_case() {
    assert_eq!(normalize_name("\\App\\Models\\User"), "user");
    assert_eq!(normalize_name("getRows"), "getrows");
    assert_eq!(normalize_name(""), "");
}

#[test]
fn bind_collects_functions_classes_and_methods() {
    let doc = parse(
        "<?php
        namespace App;
        function makeRow() { return []; }
        if (true) { function nested() {} }
        final class Repo extends Base {
            public static function find() {}
            private function load() {}
        }
        interface Shape { function area(); }
        enum Suit: string { case Hearts = 'H'; }
        ",
    );
    let table = BinderState::new().bind_document(&doc);

    assert_eq!(table.functions("makerow").len(), 1);
    assert_eq!(table.functions("\\App\\makeRow").len(), 1);
    assert_eq!(table.functions("nested").len(), 1);
    assert_eq!(table.classes("repo").len(), 1);
    assert_eq!(table.classes("Shape").len(), 1);
    assert_eq!(table.classes("suit").len(), 1);

    let find = table.methods("FIND");
    assert_eq!(find.len(), 1);
    assert_eq!(find[0].kind, SymbolKind::Method);
    assert_eq!(find[0].container.as_deref(), Some("repo"));
    assert_eq!(table.methods("area")[0].container.as_deref(), Some("shape"));

    let declaration = doc.node(table.functions("makerow")[0].declaration).unwrap();
    assert!(declaration.is_phrase_of(&[PhraseKind::FunctionDeclaration]));
    assert_eq!(table.len(), 8);
}

#[test]
fn bind_same_method_name_in_two_classes() {
    let doc = parse("<?php class A { function rows() {} } class B { function rows() {} }");
    let table = BinderState::new().bind_document(&doc);
    let containers: Vec<_> = table
        .methods("rows")
        .iter()
        .map(|s| s.container.clone().unwrap_or_default())
        .collect();
    assert_eq!(containers, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn reference_of_function_and_method_calls() {
    let doc = parse("<?php \\Lib\\getRow(); $db->fetchAll(); Repo::Find();");

    let call = find(&doc, PhraseKind::FunctionCallExpression);
    assert_eq!(reference_of(call), Some(Reference::function("getrow")));

    let method = find(&doc, PhraseKind::MethodCallExpression);
    assert_eq!(
        reference_of(method),
        Some(Reference::Method {
            class: None,
            name: "fetchall".into()
        })
    );

    let scoped = find(&doc, PhraseKind::ScopedCallExpression);
    assert_eq!(reference_of(scoped), Some(Reference::method(Some("Repo"), "find")));
}

#[test]
fn reference_of_self_static_and_parent() {
    let doc = parse(
        "<?php class Child extends \\Base\\Model {
            function a() { self::one(); static::two(); parent::three(); }
        }",
    );
    let classes: Vec<_> = doc
        .root()
        .descendants()
        .filter(|n| n.is_phrase_of(&[PhraseKind::ScopedCallExpression]))
        .filter_map(reference_of)
        .map(|r| match r {
            Reference::Method { class, .. } => class,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        classes,
        vec![
            Some("child".to_string()),
            Some("child".to_string()),
            Some("model".to_string())
        ]
    );
}

#[test]
fn reference_of_class_name_in_new() {
    let doc = parse("<?php $x = new \\App\\Repo();");
    let name = find(&doc, PhraseKind::ClassTypeDesignator)
        .child_of(&[PhraseKind::QualifiedName])
        .unwrap();
    assert_eq!(reference_of(name), Some(Reference::class("repo")));
}

#[test]
fn variable_scope_is_innermost_function_like() {
    let doc = parse(
        "<?php $top = 1;
        function f($a) { $b = 1; $g = function ($c) { return $c; }; }",
    );
    let top = variables(&doc, "$top")[0];
    assert!(variable_scope(top).is_phrase_of(&[PhraseKind::Script]));

    let b = variables(&doc, "$b")[0];
    assert!(variable_scope(b).is_phrase_of(&[PhraseKind::FunctionDeclaration]));

    let c = variables(&doc, "$c")[1];
    assert!(variable_scope(c).is_phrase_of(&[PhraseKind::AnonymousFunctionCreationExpression]));

    // A parameter belongs to its own function.
    let a = variables(&doc, "$a")[0];
    assert!(variable_scope(a).is_phrase_of(&[PhraseKind::FunctionDeclaration]));
}

#[test]
fn variable_declaration_is_first_occurrence_in_scope() {
    let doc = parse("<?php $row = ['a' => 1]; $row['b'] = 2; echo $row['a'];");
    let uses = variables(&doc, "$row");
    assert_eq!(uses.len(), 3);
    let scope = variable_scope(uses[2]);
    assert_eq!(variable_declaration(scope, "$row"), Some(uses[0]));
    assert_eq!(variable_declaration(scope, "$missing"), None);
}

#[test]
fn variable_declaration_prefers_parameter() {
    let doc = parse("<?php function f(array $row) { $row = []; return $row; }");
    let uses = variables(&doc, "$row");
    let scope = variable_scope(uses[2]);
    let declaration = variable_declaration(scope, "$row").unwrap();
    assert_eq!(declaration, uses[0]);
    assert!(declaration.parent().unwrap().is_phrase_of(&[PhraseKind::ParameterDeclaration]));
}

#[test]
fn variable_declaration_skips_nested_scopes_and_properties() {
    let doc = parse(
        "<?php
        class Box { private $row; }
        $f = function () { $row = 1; };
        $row = 2;
        echo $row;",
    );
    let uses = variables(&doc, "$row");
    assert_eq!(uses.len(), 4);
    let declaration = variable_declaration(doc.root(), "$row").unwrap();
    assert_eq!(declaration, uses[2]);
}

#[test]
fn reference_of_variable_carries_scope() {
    let doc = parse("<?php function f() { $x = 1; return $x; }");
    let uses = variables(&doc, "$x");
    let function = find(&doc, PhraseKind::FunctionDeclaration);
    assert_eq!(
        reference_of(uses[1]),
        Some(Reference::Variable {
            name: "$x".into(),
            scope: function.key(),
        })
    );
    // SimpleVariable wraps the token and refers to the same variable.
    let simple = uses[1].parent().unwrap();
    assert!(simple.is_phrase_of(&[PhraseKind::SimpleVariable]));
    assert_eq!(reference_of(simple), reference_of(uses[1]));
}
