//! Keys of an array literal passed where a documented array shape is
//! expected: `f(['<>' => 1])`, `new Foo(['<>'])`, and literals nested in
//! those under a key.

use super::key_items;
use crate::adapter::key_candidates;
use crate::completions::{CompletionItem, CompletionRequest};
use phz_binder::{Reference, reference_of};
use phz_checker::ResolutionContext;
use phz_checker::resolvers::argument::{self, nth_parameter};
use phz_checker::resolvers::array_literal::key_type;
use phz_checker::resolvers::call::CALL_EXPRESSIONS;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{Type, get_key};

pub fn provide<'s>(
    request: &CompletionRequest<'s>,
    ctx: &ResolutionContext<'s>,
) -> Vec<CompletionItem> {
    let token = request.token;
    if !token.is_token_of(TokenKind::StringLiteral) {
        return Vec::new();
    }
    let Some(array) = enclosing_array_literal(token) else {
        return Vec::new();
    };
    let limit = request.options.list_index_suggestions;
    let candidates = expected_types(array, ctx)
        .iter()
        .flat_map(|ty| key_candidates(ty, limit))
        .collect::<Vec<_>>();
    key_items(candidates, |label| label)
}

/// Array literal whose element key or value is `token`.
fn enclosing_array_literal(token: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    token
        .parent()?
        .as_phrase_of(&[PhraseKind::ArrayKey, PhraseKind::ArrayValue])?
        .parent()?
        .as_phrase_of(&[PhraseKind::ArrayElement])?
        .parent()?
        .as_phrase_of(&[PhraseKind::ArrayInitialiserList])?
        .parent()?
        .as_phrase_of(&[PhraseKind::ArrayCreationExpression])
}

/// Shapes `array` is expected to have where it is written.
fn expected_types<'s>(array: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(parent) = array.parent() else {
        return Vec::new();
    };
    match parent.phrase_kind() {
        Some(PhraseKind::ArgumentExpressionList) => argument_types(array, parent, ctx),
        Some(PhraseKind::NamedArgument) => named_argument_types(parent, ctx),
        Some(PhraseKind::ArrayValue) => {
            let Some(element) = parent
                .parent()
                .and_then(|e| e.as_phrase_of(&[PhraseKind::ArrayElement]))
            else {
                return Vec::new();
            };
            let Some(outer) = element
                .parent()
                .and_then(|list| list.parent())
                .and_then(|a| a.as_phrase_of(&[PhraseKind::ArrayCreationExpression]))
            else {
                return Vec::new();
            };
            let key = element
                .child_of(&[PhraseKind::ArrayKey])
                .map_or(Type::Any, key_type);
            expected_types(outer, ctx)
                .iter()
                .flat_map(|shape| get_key(shape, &key))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Declarations of the function, method or constructor receiving
/// `arguments`.
fn callee_declarations<'s>(
    arguments: SyntaxNode<'s>,
    ctx: &ResolutionContext<'s>,
) -> Vec<SyntaxNode<'s>> {
    let Some(call) = arguments.parent() else {
        return Vec::new();
    };
    let reference = if call.is_phrase_of(CALL_EXPRESSIONS) {
        reference_of(call)
    } else if call.is_phrase_of(&[PhraseKind::ObjectCreationExpression]) {
        constructor_reference(call)
    } else {
        None
    };
    reference
        .map(|reference| ctx.declarations_of(&reference))
        .unwrap_or_default()
}

/// `__construct` of the class a `new` expression instantiates.
fn constructor_reference(creation: SyntaxNode<'_>) -> Option<Reference> {
    let name = creation
        .child_of(&[PhraseKind::ClassTypeDesignator])?
        .nth_child(0)?;
    match reference_of(name)? {
        Reference::Class { name } => Some(Reference::method(Some(&name), "__construct")),
        _ => None,
    }
}

/// Documented type of the parameter at `array`'s position.
fn argument_types<'s>(
    array: SyntaxNode<'s>,
    arguments: SyntaxNode<'s>,
    ctx: &ResolutionContext<'s>,
) -> Vec<Type> {
    let Some(index) = arguments
        .significant_children()
        .filter(|c| !c.is_token_of(TokenKind::Comma))
        .position(|c| c == array)
    else {
        return Vec::new();
    };
    callee_declarations(arguments, ctx)
        .into_iter()
        .filter_map(|decl| nth_parameter(decl, index))
        .flat_map(|param| argument::resolve(param, ctx))
        .collect()
}

/// Documented type of the parameter a named argument binds.
fn named_argument_types<'s>(named: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let (Some(name), Some(arguments)) = (
        named.nth_child(0).and_then(|n| n.as_token_of(TokenKind::Name)),
        named.parent(),
    ) else {
        return Vec::new();
    };
    let variable = format!("${}", name.text());
    callee_declarations(arguments, ctx)
        .into_iter()
        .flat_map(|decl| phz_binder::parameters(decl).collect::<Vec<_>>())
        .filter(|param| {
            param
                .child_token(TokenKind::VariableName)
                .is_some_and(|v| v.text() == variable)
        })
        .flat_map(|param| argument::resolve(param, ctx))
        .collect()
}
