//! Variables: the union of what every assignment, `foreach` binding and
//! parameter declaration of the same name in scope says.

use super::argument;
use super::literal::literal_type;
use super::subscript::subscript_key;
use crate::context::ResolutionContext;
use crate::scope_finder::find_var_refs;
use phz_binder::reference_of;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{Type, get_key, key_types};
use tracing::trace;

pub fn resolve<'s>(expr: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(variable) = expr.as_phrase_of(&[PhraseKind::SimpleVariable]) else {
        return Vec::new();
    };
    let mut occurrences = reference_of(variable)
        .map(|reference| ctx.declarations_of(&reference))
        .unwrap_or_default();
    for occurrence in find_var_refs(variable) {
        if !occurrences.contains(&occurrence) {
            occurrences.push(occurrence);
        }
    }
    trace!(
        variable = variable.text(),
        occurrences = occurrences.len(),
        "variable occurrences"
    );
    occurrences
        .into_iter()
        .flat_map(|name| occurrence_types(name, ctx))
        .collect()
}

/// What one `$name` token says about the variable's value.
fn occurrence_types<'s>(name: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let Some(parent) = name.parent() else {
        return Vec::new();
    };
    if !parent.is_phrase_of(&[PhraseKind::SimpleVariable]) {
        return argument::resolve(parent, ctx);
    }
    let mut types = assigned_types(parent, ctx);
    if let Some(collection) = foreach_collection(parent, PhraseKind::ForeachValue) {
        types.extend(
            ctx.resolve(collection)
                .iter()
                .flat_map(|shape| get_key(shape, &Type::Any)),
        );
    }
    if let Some(collection) = foreach_collection(parent, PhraseKind::ForeachKey) {
        types.extend(ctx.resolve(collection).iter().flat_map(key_types));
    }
    types
}

/// One index step of an assignment target, innermost first.
enum KeyStep {
    /// `$v[] = ...`
    Append,
    Key(Type),
}

/// `$v = x`, `$v[k] = x`, `$v[] = x` and deeper chains: the resolved
/// value, wrapped back out through the index steps.
fn assigned_types<'s>(variable: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> Vec<Type> {
    let mut target = variable;
    let mut steps = Vec::new();
    while let Some(subscript) = target
        .parent()
        .and_then(|p| p.as_phrase_of(&[PhraseKind::SubscriptExpression]))
    {
        if subscript.nth_child(0) != Some(target) {
            // The variable is the key, not the array.
            return Vec::new();
        }
        steps.push(match subscript_key(subscript) {
            None => KeyStep::Append,
            Some(key) => KeyStep::Key(literal_type(key).unwrap_or(Type::Any)),
        });
        target = subscript;
    }

    let Some(assignment) = target
        .parent()
        .and_then(|p| p.as_phrase_of(&[PhraseKind::SimpleAssignmentExpression]))
        .filter(|a| a.nth_child(0) == Some(target))
    else {
        return Vec::new();
    };
    let Some(value) = assignment.significant_children().skip(1).find(|c| {
        !c.is_token_of(TokenKind::Equals) && !c.is_token_of(TokenKind::Ampersand)
    }) else {
        return Vec::new();
    };

    ctx.resolve(value)
        .into_iter()
        .map(|ty| {
            steps.iter().rev().fold(ty, |inner, step| match step {
                KeyStep::Append => Type::list(inner),
                KeyStep::Key(key) => Type::map(key.clone(), inner),
            })
        })
        .collect()
}

/// Collection expression of the `foreach` binding `variable` through the
/// `binding` slot (`ForeachKey` or `ForeachValue`).
fn foreach_collection(variable: SyntaxNode<'_>, binding: PhraseKind) -> Option<SyntaxNode<'_>> {
    variable
        .parent()?
        .as_phrase_of(&[binding])?
        .parent()?
        .as_phrase_of(&[PhraseKind::ForeachStatement])?
        .child_of(&[PhraseKind::ForeachCollection])?
        .nth_child(0)
}
