//! Function, method and static calls: what the callee's docblock says it
//! returns plus whatever its `return` statements resolve to.

use crate::context::ResolutionContext;
use crate::docs::{AliasScope, function_body, function_doc};
use crate::scope_finder::{find_returns, return_expression};
use phz_binder::reference_of;
use phz_parser::{PhraseKind, SyntaxNode};
use phz_solver::{Type, flatten_types};

pub const CALL_EXPRESSIONS: &[PhraseKind] = &[
    PhraseKind::FunctionCallExpression,
    PhraseKind::MethodCallExpression,
    PhraseKind::ScopedCallExpression,
];

pub fn resolve<'s>(expr: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(reference) = expr.as_phrase_of(CALL_EXPRESSIONS).and_then(reference_of) else {
        return Vec::new();
    };
    let mut types = Vec::new();
    for decl in ctx.declarations_of(&reference) {
        types.extend(documented_returns(decl, ctx));
        types.extend(inferred_returns(decl, ctx));
    }
    types
}

/// Flattened `@return` type, aliases expanded.
fn documented_returns<'s>(decl: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(returned) = function_doc(decl).and_then(|info| info.return_type) else {
        return Vec::new();
    };
    flatten_types(AliasScope::at(decl, ctx).expand(returned))
}

fn inferred_returns<'s>(decl: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(body) = function_body(decl) else {
        return Vec::new();
    };
    find_returns(body)
        .into_iter()
        .filter_map(return_expression)
        .flat_map(|expr| ctx.resolve(expr))
        .collect()
}
