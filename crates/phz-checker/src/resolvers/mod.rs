//! Resolution strategies, one per expression form.
//!
//! Each strategy inspects the expression's syntactic form and contributes
//! nothing when the form is not its own, so every strategy runs on every
//! expression and the results concatenate.

pub mod argument;
pub mod array_literal;
pub mod call;
pub mod literal;
pub mod subscript;
pub mod variable;

use crate::context::ResolutionContext;
use phz_parser::SyntaxNode;
use phz_solver::Type;

pub type Strategy = for<'s> fn(SyntaxNode<'s>, &ResolutionContext<'s>) -> Vec<Type>;

/// Strategies in the order their results are concatenated.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("array_literal", array_literal::resolve),
    ("call", call::resolve),
    ("variable", variable::resolve),
    ("subscript", subscript::resolve),
    ("literal", literal::resolve),
];
