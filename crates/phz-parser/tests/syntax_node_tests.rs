//! Tests for SyntaxNode navigation and offset lookup.
use crate::document::ParsedDocument;
use crate::parser::{DocId, PhraseKind};
use phz_scanner::TokenKind;

#[test]
fn token_at_uses_pos_exclusive_end_inclusive() {
    let source = "<?php echo $x['a'];";
    let doc = ParsedDocument::parse("test.php", source);

    // Caret between the quotes of 'a'
    let quote = source.find("'a'").unwrap() as u32;
    let token = doc.token_at(quote + 1).expect("token");
    assert!(token.is_token_of(TokenKind::StringLiteral));

    // Caret right after `[` belongs to `[`
    let bracket = source.find('[').unwrap() as u32;
    let token = doc.token_at(bracket + 1).expect("token");
    assert!(token.is_token_of(TokenKind::OpenBracket));

    // Offset 0 is the first token
    assert!(doc.token_at(0).unwrap().is_token_of(TokenKind::OpenTag));
    assert!(doc.token_at(source.len() as u32 + 10).is_none());
}

#[test]
fn zero_or_one_navigation_chains() {
    let doc = ParsedDocument::parse("test.php", "<?php $x = [1];");
    let root = doc.root();
    assert!(root.as_phrase_of(&[PhraseKind::Script]).is_some());
    assert!(root.as_token().is_none());
    assert!(root.parent().is_none());

    let variable = doc
        .root()
        .descendants()
        .find(|n| n.is_token_of(TokenKind::VariableName))
        .unwrap();
    let assignment = variable
        .parent()
        .and_then(|p| p.as_phrase_of(&[PhraseKind::SimpleVariable]))
        .and_then(|p| p.parent())
        .and_then(|p| p.as_phrase_of(&[PhraseKind::SimpleAssignmentExpression]));
    assert!(assignment.is_some());

    let missing = variable
        .parent()
        .and_then(|p| p.as_phrase_of(&[PhraseKind::FunctionDeclaration]));
    assert!(missing.is_none());
}

#[test]
fn nth_child_skips_trivia_but_siblings_do_not() {
    let doc = ParsedDocument::parse("test.php", "<?php $x[ 'k' ];");
    let subscript = doc
        .root()
        .descendants()
        .find(|n| n.is_phrase_of(&[PhraseKind::SubscriptExpression]))
        .unwrap();
    assert_eq!(subscript.nth_child(2).map(|n| n.text()), Some("'k'"));

    let open = subscript.nth_child(1).unwrap();
    assert!(open.next_sibling().unwrap().is_token_of(TokenKind::Whitespace));
    let key = open
        .next_sibling_where(|n| !n.is_trivia())
        .unwrap();
    assert_eq!(key.text(), "'k'");
    assert_eq!(key.prev_sibling_where(|n| !n.is_trivia()), Some(open));
}

#[test]
fn identity_equality_and_keys() {
    let mut doc = ParsedDocument::parse("test.php", "<?php f(); f();");
    doc.set_id(DocId(7));
    let calls: Vec<_> = doc
        .root()
        .descendants()
        .filter(|n| n.is_phrase_of(&[PhraseKind::FunctionCallExpression]))
        .collect();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].text(), calls[1].text());
    assert_ne!(calls[0], calls[1]);
    assert_eq!(calls[0], calls[0].nth_child(0).unwrap().parent().unwrap());
    assert_eq!(calls[0].key().doc, DocId(7));
    assert_ne!(calls[0].key(), calls[1].key());
}

#[test]
fn ancestors_reach_script() {
    let doc = ParsedDocument::parse("test.php", "<?php function f() { if (1) { return 2; } }");
    let literal = doc
        .root()
        .descendants()
        .filter(|n| n.is_token_of(TokenKind::IntegerLiteral))
        .last()
        .unwrap();
    let kinds: Vec<_> = literal.ancestors().filter_map(|n| n.phrase_kind()).collect();
    assert_eq!(kinds.first(), Some(&PhraseKind::ReturnStatement));
    assert_eq!(kinds.last(), Some(&PhraseKind::Script));
    assert!(kinds.contains(&PhraseKind::FunctionDeclarationBody));
}

#[test]
fn iterators_outlive_the_node_they_start_from() {
    let doc = ParsedDocument::parse("test.php", "<?php $a = [1, 2]; $b = [3];");
    // Each intermediate node is a temporary inside the closure; the
    // iterators only borrow the document.
    let grandchildren: Vec<_> = doc
        .root()
        .children()
        .flat_map(|statement| statement.children())
        .flat_map(|child| child.significant_children())
        .collect();
    assert!(!grandchildren.is_empty());

    let ancestors = {
        let literal = doc
            .root()
            .descendants()
            .find(|n| n.is_token_of(TokenKind::IntegerLiteral))
            .unwrap();
        literal.ancestors()
    };
    assert_eq!(
        ancestors.filter_map(|n| n.phrase_kind()).last(),
        Some(PhraseKind::Script)
    );
}
