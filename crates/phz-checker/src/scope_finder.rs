//! Searches confined to one function body.
//!
//! Nested named functions, closures and class bodies are separate scopes:
//! the walk neither matches inside them nor descends into them. Arrow
//! function bodies are walked, since they read the enclosing scope.

use phz_parser::{PhraseKind, SyntaxNode, TokenKind};

/// Phrases that end a body walk.
const NESTED_SCOPES: &[PhraseKind] = &[
    PhraseKind::FunctionDeclarationBody,
    PhraseKind::ClassMemberDeclarationList,
];

/// Pre-order walk below `root`, collecting matches without descending into
/// them or into nested scopes.
fn find_in_body<'s>(
    root: SyntaxNode<'s>,
    matches: impl Fn(&SyntaxNode<'s>) -> bool,
) -> Vec<SyntaxNode<'s>> {
    let mut found = Vec::new();
    let mut stack: Vec<SyntaxNode<'s>> = root.children().filter(|c| c.as_phrase().is_some()).collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if node.is_phrase_of(NESTED_SCOPES) {
            continue;
        }
        if matches(&node) {
            found.push(node);
            continue;
        }
        let mark = stack.len();
        stack.extend(node.children().filter(|c| c.as_phrase().is_some()));
        stack[mark..].reverse();
    }
    found
}

/// `return` statements of a function body.
pub fn find_returns<'s>(body: SyntaxNode<'s>) -> Vec<SyntaxNode<'s>> {
    find_in_body(body, |n| n.is_phrase_of(&[PhraseKind::ReturnStatement]))
}

/// Expression a `return` statement returns, if any.
pub fn return_expression(statement: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    statement
        .significant_children()
        .skip(1)
        .find(|c| !c.is_token_of(TokenKind::Semicolon))
}

/// Body a variable's references are searched in: the innermost function or
/// method body around it, or the whole script.
pub fn reference_scope(node: SyntaxNode<'_>) -> SyntaxNode<'_> {
    node.ancestors()
        .find(|a| {
            a.is_phrase_of(&[
                PhraseKind::FunctionDeclarationBody,
                PhraseKind::MethodDeclarationBody,
            ])
        })
        .unwrap_or_else(|| node.document().root())
}

/// `$name` tokens of every other use of `variable` (a `SimpleVariable`) in
/// its scope, in source order.
pub fn find_var_refs<'s>(variable: SyntaxNode<'s>) -> Vec<SyntaxNode<'s>> {
    let Some(name) = variable.child_token(TokenKind::VariableName) else {
        return Vec::new();
    };
    let scope = reference_scope(variable);
    find_in_body(scope, |n| {
        n.is_phrase_of(&[PhraseKind::SimpleVariable])
            && n.child_token(TokenKind::VariableName)
                .is_some_and(|t| t.text() == name.text())
    })
    .into_iter()
    .filter(|n| *n != variable)
    .filter_map(|n| n.child_token(TokenKind::VariableName))
    .collect()
}
