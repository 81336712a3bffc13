//! Symbol references: what a call or variable expression refers to.

use crate::scope::variable_scope;
use crate::state::{enclosing_class_name, enclosing_parent_class_name};
use crate::symbols::normalize_name;
use phz_parser::{NodeKey, NodeKind, PhraseKind, SyntaxNode, TokenKind};
use serde::Serialize;

/// A reference from a use site to its declaration(s).
///
/// Function, class and method names are normalized (namespace prefix
/// stripped, lowercased); variable names keep their `$` and their case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    Function {
        name: String,
    },
    Class {
        name: String,
    },
    /// `class: None` when the receiver type is unknown: every class'
    /// method of that name matches.
    Method {
        class: Option<String>,
        name: String,
    },
    Variable {
        name: String,
        scope: NodeKey,
    },
}

impl Reference {
    pub fn function(name: &str) -> Reference {
        Reference::Function {
            name: normalize_name(name),
        }
    }

    pub fn class(name: &str) -> Reference {
        Reference::Class {
            name: normalize_name(name),
        }
    }

    pub fn method(class: Option<&str>, name: &str) -> Reference {
        Reference::Method {
            class: class.map(normalize_name),
            name: name.to_ascii_lowercase(),
        }
    }
}

/// Reference made by `node`, when it is a call, a variable or a class name.
pub fn reference_of(node: SyntaxNode<'_>) -> Option<Reference> {
    match node.kind() {
        NodeKind::Token(TokenKind::VariableName) => Some(variable_reference(node)),
        NodeKind::Phrase(PhraseKind::SimpleVariable) => node
            .child_token(TokenKind::VariableName)
            .map(variable_reference),
        NodeKind::Phrase(PhraseKind::FunctionCallExpression) => {
            let callee = node
                .nth_child(0)?
                .as_phrase_of(&[PhraseKind::QualifiedName])?;
            Some(Reference::function(callee.text()))
        }
        NodeKind::Phrase(PhraseKind::MethodCallExpression) => {
            let name = node
                .child_of(&[PhraseKind::MemberName])?
                .nth_child(0)?
                .as_token_of(TokenKind::Name)?;
            Some(Reference::method(None, name.text()))
        }
        NodeKind::Phrase(PhraseKind::ScopedCallExpression) => {
            let name = node
                .child_of(&[PhraseKind::ScopedMemberName])?
                .nth_child(0)?
                .as_token_of(TokenKind::Name)?;
            let class = node
                .nth_child(0)
                .and_then(|scope| scope.as_phrase_of(&[PhraseKind::QualifiedName]))
                .and_then(|scope| scoped_class_name(scope));
            Some(Reference::Method {
                class,
                name: name.text().to_ascii_lowercase(),
            })
        }
        NodeKind::Phrase(PhraseKind::QualifiedName) => {
            let parent = node.parent()?;
            parent.as_phrase_of(&[
                PhraseKind::ClassTypeDesignator,
                PhraseKind::ClassBaseClause,
                PhraseKind::ClassInterfaceClause,
                PhraseKind::TypeDeclaration,
            ])?;
            scoped_class_name(node).map(|name| Reference::Class { name })
        }
        _ => None,
    }
}

fn variable_reference(token: SyntaxNode<'_>) -> Reference {
    Reference::Variable {
        name: token.text().to_string(),
        scope: variable_scope(token).key(),
    }
}

/// Class named by `name`, with `self`/`static`/`parent` resolved.
fn scoped_class_name(name: SyntaxNode<'_>) -> Option<String> {
    match name.text().to_ascii_lowercase().as_str() {
        "self" | "static" => enclosing_class_name(name),
        "parent" => enclosing_parent_class_name(name),
        _ => Some(normalize_name(name.text())),
    }
}
