//! Tests for return and variable-reference search.
use crate::docs::function_body;
use crate::scope_finder::{find_returns, find_var_refs, reference_scope, return_expression};
use phz_parser::{ParsedDocument, PhraseKind, SyntaxNode};

fn parse(source: &str) -> ParsedDocument {
    ParsedDocument::parse("test.php", source)
}

fn phrases<'a>(doc: &'a ParsedDocument, kind: PhraseKind) -> Vec<SyntaxNode<'a>> {
    doc.root()
        .descendants()
        .filter(|n| n.phrase_kind() == Some(kind))
        .collect()
}

#[test]
fn find_returns_skips_nested_functions_and_classes() {
    let doc = parse(
        "<?php
function outer($x) {
    if ($x) { return 1; }
    $f = function () { return 2; };
    function inner() { return 3; }
    $o = new class { public function m() { return 4; } };
    $g = fn() => 5;
    return 6;
}",
    );
    let outer = phrases(&doc, PhraseKind::FunctionDeclaration)[0];
    let body = function_body(outer).expect("body");
    let returned: Vec<&str> = find_returns(body)
        .into_iter()
        .filter_map(return_expression)
        .map(|e| e.text())
        .collect();
    assert_eq!(returned, vec!["1", "6"]);
}

#[test]
fn find_returns_in_method_body() {
    let doc = parse("<?php class A { public function m() { return ['a' => 1]; } abstract function n(); }");
    let methods = phrases(&doc, PhraseKind::MethodDeclaration);
    let body = function_body(methods[0]).expect("body");
    assert_eq!(find_returns(body).len(), 1);
    assert!(function_body(methods[1]).is_none());
}

#[test]
fn return_without_expression() {
    let doc = parse("<?php function f() { return; }");
    let ret = phrases(&doc, PhraseKind::ReturnStatement)[0];
    assert!(return_expression(ret).is_none());
}

#[test]
fn find_var_refs_excludes_self_and_other_scopes() {
    let doc = parse(
        "<?php
function f() {
    $a = 1;
    $a['k'] = 2;
    $b = function () { return $a; };
    echo $a;
}
$a = 3;",
    );
    let variables: Vec<_> = phrases(&doc, PhraseKind::SimpleVariable)
        .into_iter()
        .filter(|v| v.text() == "$a")
        .collect();
    // $a = 1, $a['k'], closure $a, echo $a, top-level $a
    assert_eq!(variables.len(), 5);
    let caret = variables[3];
    let refs = find_var_refs(caret);
    let positions: Vec<u32> = refs.iter().map(|r| r.pos()).collect();
    assert_eq!(positions, vec![variables[0].pos(), variables[1].pos()]);
}

#[test]
fn reference_scope_of_top_level_is_script() {
    let doc = parse("<?php $x = 1; echo $x;");
    let variable = phrases(&doc, PhraseKind::SimpleVariable)[0];
    assert_eq!(reference_scope(variable), doc.root());
}
