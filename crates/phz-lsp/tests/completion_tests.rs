//! Completion tests. `<>` marks the caret in each source.
use crate::completions::{
    CompletionItem, CompletionItemKind, CompletionOptions, DEFAULT_DETAIL, complete, sort_text,
};
use phz_binder::ProjectStore;

/// Source with the caret marker removed, and the caret offset.
fn split_caret(marked: &str) -> (String, u32) {
    let offset = marked.find("<>").expect("caret marker");
    (marked.replacen("<>", "", 1), offset as u32)
}

fn complete_in(marked: &str, others: &[(&str, &str)]) -> Vec<CompletionItem> {
    let (source, offset) = split_caret(marked);
    let mut store = ProjectStore::new();
    for (uri, text) in others {
        store.add_source(*uri, *text);
    }
    store.add_source("main.php", source);
    complete(&store, "main.php", offset, &CompletionOptions::default())
}

fn labels(marked: &str) -> Vec<String> {
    complete_in(marked, &[])
        .into_iter()
        .map(|item| item.label)
        .collect()
}

// =============================================================================
// Subscript keys
// =============================================================================

#[test]
fn keys_of_function_return_inside_quotes() {
    let source = r#"<?php
function f() { return ['a' => 1, 'b' => 2]; }
$x = f();
$x['<>'];
"#;
    assert_eq!(labels(source), vec!["a", "b"]);
}

#[test]
fn keys_after_open_bracket_are_quoted() {
    let source = r#"<?php
$x = ['a' => 1, 'b' => 2];
$x[<>
"#;
    assert_eq!(labels(source), vec!["'a'", "'b'"]);
}

#[test]
fn numeric_labels_stay_unquoted() {
    let source = r#"<?php
/** @param string[] $names */
function f($names) {
    $names[<>];
}
"#;
    assert_eq!(labels(source), vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn list_suggestions_follow_options() {
    let (source, offset) = split_caret(
        r#"<?php
/** @param list<int> $ids */
function f($ids) {
    $ids[<>];
}
"#,
    );
    let mut store = ProjectStore::new();
    store.add_source("main.php", source);
    let options = CompletionOptions {
        list_index_suggestions: 2,
    };
    let items = complete(&store, "main.php", offset, &options);
    assert_eq!(
        items.iter().map(|i| i.label.as_str()).collect::<Vec<_>>(),
        vec!["0", "1"]
    );
}

#[test]
fn documented_param_keys_with_detail() {
    let source = r#"<?php
/** @param array{id: int, name: string} $row */
function show(array $row) {
    return $row['<>'];
}
"#;
    let items = complete_in(source, &[]);
    assert_eq!(
        items,
        vec![
            CompletionItem {
                label: "id".to_string(),
                kind: CompletionItemKind::Field,
                detail: "int".to_string(),
                sort_text: "0000000".to_string(),
            },
            CompletionItem {
                label: "name".to_string(),
                kind: CompletionItemKind::Field,
                detail: "string".to_string(),
                sort_text: "0000001".to_string(),
            },
        ]
    );
}

#[test]
fn nested_subscript_descends_by_key() {
    let source = r#"<?php
$config = ['db' => ['host' => 'localhost', 'port' => 5432]];
$config['db']['<>'];
"#;
    assert_eq!(labels(source), vec!["host", "port"]);
}

#[test]
fn duplicate_labels_keep_first() {
    let source = r#"<?php
if (rand()) {
    $x = ['a' => 1, 'b' => 2];
} else {
    $x = ['b' => 3, 'c' => 4];
}
$x['<>'];
"#;
    let items = complete_in(source, &[]);
    let ranked: Vec<(&str, &str)> = items
        .iter()
        .map(|i| (i.label.as_str(), i.sort_text.as_str()))
        .collect();
    assert_eq!(
        ranked,
        vec![("a", "0000000"), ("b", "0000001"), ("c", "0000002")]
    );
}

#[test]
fn keys_from_method_in_other_document() {
    let repo = r#"<?php
class Repo {
    /** @return array{total: int, items: list<string>} */
    public function page() {}
}
"#;
    let source = r#"<?php
$page = $repo->page();
$page['<>'];
"#;
    let labels: Vec<String> = complete_in(source, &[("repo.php", repo)])
        .into_iter()
        .map(|i| i.label)
        .collect();
    assert_eq!(labels, vec!["total", "items"]);
}

#[test]
fn unknown_target_offers_nothing() {
    assert!(labels("<?php $unknown['<>'];").is_empty());
}

#[test]
fn caret_outside_any_context_offers_nothing() {
    assert!(labels("<?php $x = 1;<>").is_empty());
    assert!(complete(
        &ProjectStore::new(),
        "missing.php",
        0,
        &CompletionOptions::default()
    )
    .is_empty());
}

// =============================================================================
// Array literal keys passed as arguments
// =============================================================================

#[test]
fn argument_literal_key() {
    let source = r#"<?php
/** @param array{host: string, port: int} $options */
function connect(array $options) {}
connect(['<>' => 1]);
"#;
    assert_eq!(labels(source), vec!["host", "port"]);
}

#[test]
fn argument_literal_positional_value() {
    let source = r#"<?php
/** @param array{host: string, port: int} $options */
function connect(array $options) {}
connect(['<>']);
"#;
    assert_eq!(labels(source), vec!["host", "port"]);
}

#[test]
fn second_argument_uses_second_parameter() {
    let source = r#"<?php
/**
 * @param array{a: int} $first
 * @param array{b: int} $second
 */
function pair($first, $second) {}
pair([], ['<>' => 1]);
"#;
    assert_eq!(labels(source), vec!["b"]);
}

#[test]
fn named_argument_uses_named_parameter() {
    let source = r#"<?php
/**
 * @param array{a: int} $first
 * @param array{b: int} $second
 */
function pair($first = [], $second = []) {}
pair(second: ['<>' => 1]);
"#;
    assert_eq!(labels(source), vec!["b"]);
}

#[test]
fn constructor_argument() {
    let source = r#"<?php
class Client {
    /** @param array{timeout: int, retries: int} $options */
    public function __construct(array $options) {}
}
new Client(['<>' => 1]);
"#;
    assert_eq!(labels(source), vec!["timeout", "retries"]);
}

#[test]
fn static_method_argument() {
    let source = r#"<?php
class Query {
    /** @param array{limit: int} $opts */
    public static function run(array $opts) {}
}
Query::run(['<>' => 10]);
"#;
    assert_eq!(labels(source), vec!["limit"]);
}

#[test]
fn nested_literal_descends_by_outer_key() {
    let source = r#"<?php
/** @param array{db: array{host: string, port: int}, debug: bool} $config */
function boot(array $config) {}
boot(['db' => ['<>' => 'x']]);
"#;
    assert_eq!(labels(source), vec!["host", "port"]);
}

#[test]
fn argument_keys_through_alias() {
    let source = r#"<?php
/** @psalm-type Options = array{verbose: bool, level: int} */
class Logger {
    /** @param Options $options */
    public function configure(array $options) {}
}
$logger->configure(['<>' => true]);
"#;
    assert_eq!(labels(source), vec!["verbose", "level"]);
}

#[test]
fn literal_not_in_call_offers_nothing() {
    assert!(labels("<?php $x = ['<>' => 1];").is_empty());
}

// =============================================================================
// Compared string values
// =============================================================================

#[test]
fn values_compared_against_record_field() {
    let source = r#"<?php
/** @param array{kind: 'circle'|'square'} $shape */
function area(array $shape) {
    if ($shape['kind'] === '<>') {}
}
"#;
    let items = complete_in(source, &[]);
    assert_eq!(
        items
            .iter()
            .map(|i| (i.label.as_str(), i.kind))
            .collect::<Vec<_>>(),
        vec![
            ("circle", CompletionItemKind::Value),
            ("square", CompletionItemKind::Value),
        ]
    );
}

#[test]
fn values_on_left_of_comparison() {
    let source = r#"<?php
$m = ['mode' => 'read'];
if ('<>' != $m['mode']) {}
"#;
    assert_eq!(labels(source), vec!["read"]);
}

#[test]
fn spaceship_is_not_a_comparison_context() {
    let source = r#"<?php
$m = ['mode' => 'read'];
$m['mode'] <=> '<>';
"#;
    assert!(labels(source).is_empty());
}

// =============================================================================
// Docblock tags
// =============================================================================

#[test]
fn custom_doc_tags_after_at() {
    let items = complete_in("<?php\n/** @<> */\nfunction f() {}\n", &[]);
    assert_eq!(
        items
            .iter()
            .map(|i| (i.label.as_str(), i.kind))
            .collect::<Vec<_>>(),
        vec![
            ("psalm-type", CompletionItemKind::Keyword),
            ("psalm-import-type", CompletionItemKind::Keyword),
        ]
    );
    assert_eq!(items[0].detail, DEFAULT_DETAIL);
}

#[test]
fn no_doc_tags_without_at() {
    assert!(labels("<?php\n/** text<> */\nfunction f() {}\n").is_empty());
    assert!(labels("<?php\n// @<>\n").is_empty());
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn sort_text_is_zero_padded() {
    assert_eq!(sort_text(0), "0000000");
    assert_eq!(sort_text(42), "0000042");
}

#[test]
fn item_serializes_camel_case() {
    let item = CompletionItem::new("id", CompletionItemKind::Field, 3);
    let json = serde_json::to_value(&item).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "label": "id",
            "kind": "field",
            "detail": "phz",
            "sortText": "0000003",
        })
    );
}
