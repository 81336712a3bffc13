//! Parameters: the type their function's docblock declares.

use crate::context::ResolutionContext;
use crate::docs::{AliasScope, function_doc};
use phz_binder::parameters;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{Type, flatten_types};

/// `expr` must be a `ParameterDeclaration`; anything else yields nothing.
pub fn resolve<'s>(expr: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(param) = expr.as_phrase_of(&[PhraseKind::ParameterDeclaration]) else {
        return Vec::new();
    };
    let (Some(name), Some(function)) = (
        param.child_token(TokenKind::VariableName),
        owning_function(param),
    ) else {
        return Vec::new();
    };
    let declared = function_doc(function)
        .map(|info| info.param(name.text()))
        .unwrap_or_default();
    if declared.is_empty() {
        return Vec::new();
    }
    let aliases = AliasScope::at(function, ctx);
    declared
        .into_iter()
        .flat_map(|ty| flatten_types(aliases.expand(ty)))
        .collect()
}

/// Function, method, closure or arrow function declaring `param`.
pub fn owning_function(param: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    param
        .parent()?
        .as_phrase_of(&[PhraseKind::ParameterDeclarationList])?
        .parent()?
        .parent()
        .filter(|f| f.phrase_kind().is_some_and(PhraseKind::is_function_like))
}

/// The `index`-th parameter declaration of a function-like.
pub fn nth_parameter(function: SyntaxNode<'_>, index: usize) -> Option<SyntaxNode<'_>> {
    parameters(function).nth(index)
}
