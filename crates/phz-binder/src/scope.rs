//! Variable scopes.
//!
//! PHP variables are function-scoped: a variable belongs to the innermost
//! enclosing function, method or closure, or to the script when there is
//! none. Class bodies are skipped when collecting a scope's variables since
//! `$name` tokens there declare properties.

use phz_parser::{PhraseKind, SyntaxNode, TokenKind};

/// Whether `node` opens a variable scope.
pub fn is_scope_boundary(node: &SyntaxNode<'_>) -> bool {
    node.phrase_kind().is_some_and(PhraseKind::is_function_like)
}

/// Innermost function-like containing `node`, or the script.
pub fn variable_scope<'a>(node: SyntaxNode<'a>) -> SyntaxNode<'a> {
    node.ancestors()
        .find(is_scope_boundary)
        .unwrap_or_else(|| node.document().root())
}

/// Parameter declarations of a function-like scope.
pub fn parameters<'a>(scope: SyntaxNode<'a>) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
    scope
        .child_of(&[
            PhraseKind::FunctionDeclarationHeader,
            PhraseKind::MethodDeclarationHeader,
            PhraseKind::AnonymousFunctionHeader,
            PhraseKind::ArrowFunctionHeader,
        ])
        .and_then(|header| header.child_of(&[PhraseKind::ParameterDeclarationList]))
        .into_iter()
        .flat_map(|list| list.children())
        .filter(|c| c.is_phrase_of(&[PhraseKind::ParameterDeclaration]))
}

/// Every `$name` token of `scope`, in source order, without descending into
/// nested scopes or class bodies.
pub fn variable_tokens_in_scope<'a>(scope: SyntaxNode<'a>) -> Vec<SyntaxNode<'a>> {
    let mut found = Vec::new();
    let mut stack: Vec<SyntaxNode<'a>> = scope.children().collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if node.is_token_of(TokenKind::VariableName) {
            found.push(node);
            continue;
        }
        if is_scope_boundary(&node) || node.phrase_kind().is_some_and(PhraseKind::is_class_like) {
            continue;
        }
        let mark = stack.len();
        stack.extend(node.children());
        stack[mark..].reverse();
    }
    found
}

/// Declaration of variable `name` in `scope`: the parameter's name token
/// when `name` is a parameter, otherwise its first occurrence.
pub fn variable_declaration<'a>(scope: SyntaxNode<'a>, name: &str) -> Option<SyntaxNode<'a>> {
    parameters(scope)
        .find_map(|param| {
            param
                .child_token(TokenKind::VariableName)
                .filter(|token| token.text() == name)
        })
        .or_else(|| {
            variable_tokens_in_scope(scope)
                .into_iter()
                .find(|token| token.text() == name)
        })
}
