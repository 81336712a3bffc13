//! Docblocks attached to declarations, and the `@psalm-type` aliases
//! visible at a point of a file.

use crate::context::ResolutionContext;
use phz_parser::{PhraseKind, SyntaxNode, TokenKind};
use phz_solver::{
    FuncDocInfo, ImportedTypeAlias, Type, imported_type_aliases, substitute_aliases, type_aliases,
};
use rustc_hash::FxHashMap;
use tracing::trace;

/// `/** ... */` right in front of `node`, across whitespace and plain
/// comments (attributes included).
fn preceding_doc_comment(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    node.prev_sibling_where(|n| {
        !n.is_token_of(TokenKind::Whitespace) && !n.is_token_of(TokenKind::Comment)
    })
    .and_then(|n| n.as_token_of(TokenKind::DocumentComment))
}

/// Doc comment of a declaration. Closures and arrow functions without
/// their own fall back to the doc comment of the enclosing statement.
pub fn doc_comment_of(decl: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    if let Some(comment) = preceding_doc_comment(decl) {
        return Some(comment);
    }
    if !decl.is_phrase_of(&[
        PhraseKind::AnonymousFunctionCreationExpression,
        PhraseKind::ArrowFunction,
    ]) {
        return None;
    }
    for ancestor in decl.ancestors() {
        if ancestor
            .phrase_kind()
            .is_some_and(|k| k.is_function_like() || k.is_class_like())
        {
            return None;
        }
        if let Some(comment) = preceding_doc_comment(ancestor) {
            return Some(comment);
        }
        if ancestor
            .parent()
            .is_some_and(|p| p.is_phrase_of(&[PhraseKind::StatementList]))
        {
            return None;
        }
    }
    None
}

/// Parsed `@param`/`@return` annotations of a function-like.
pub fn function_doc(decl: SyntaxNode<'_>) -> Option<FuncDocInfo> {
    doc_comment_of(decl).map(|comment| FuncDocInfo::from_doc_comment(comment.text()))
}

/// Braced body of a function-like: the node whose statements run when it
/// is called. Abstract methods and arrow functions have none.
pub fn function_body(decl: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    match decl.phrase_kind()? {
        PhraseKind::FunctionDeclaration | PhraseKind::AnonymousFunctionCreationExpression => {
            decl.child_of(&[PhraseKind::FunctionDeclarationBody])
        }
        PhraseKind::MethodDeclaration => decl
            .child_of(&[PhraseKind::MethodDeclarationBody])?
            .child_of(&[PhraseKind::CompoundStatement]),
        _ => None,
    }
}

/// Type aliases in scope at some point of a document.
#[derive(Clone, Debug, Default)]
pub struct AliasScope {
    aliases: FxHashMap<String, Type>,
}

impl AliasScope {
    /// Aliases defined by doc comments that start before `node` in its
    /// file, plus the ones those comments import from other classes. A
    /// later definition of a name replaces an earlier one.
    pub fn at<'s>(node: SyntaxNode<'s>, ctx: &ResolutionContext<'s>) -> AliasScope {
        let doc = node.document();
        let mut scope = AliasScope::default();
        for index in doc.arena().tokens() {
            let Some(token) = doc.node(*index) else {
                continue;
            };
            if token.pos() >= node.pos() {
                break;
            }
            if !token.is_token_of(TokenKind::DocumentComment) {
                continue;
            }
            for alias in type_aliases(token.text()) {
                scope.aliases.insert(alias.name, alias.ty);
            }
            for import in imported_type_aliases(token.text()) {
                match imported_alias(&import, ctx) {
                    Some(ty) => {
                        scope.aliases.insert(import.local, ty);
                    }
                    None => trace!(?import, "unresolved alias import"),
                }
            }
        }
        scope
    }

    /// `ty` with every alias name replaced by its definition.
    pub fn expand(&self, ty: Type) -> Type {
        if self.aliases.is_empty() {
            return ty;
        }
        substitute_aliases(ty, &|name| self.aliases.get(name).cloned())
    }
}

#[cfg(test)]
impl AliasScope {
    pub(crate) fn get(&self, name: &str) -> Option<&Type> {
        self.aliases.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.aliases.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Definition of an imported alias, read from the exporting class'
/// docblock and expanded against that docblock's own aliases.
fn imported_alias<'s>(import: &ImportedTypeAlias, ctx: &ResolutionContext<'s>) -> Option<Type> {
    ctx.declarations_by_fqn(&import.from_class)
        .into_iter()
        .find_map(|class| {
            let exported = type_aliases(doc_comment_of(class)?.text());
            let target = exported.iter().find(|a| a.name == import.name)?.ty.clone();
            let local: FxHashMap<String, Type> =
                exported.into_iter().map(|a| (a.name, a.ty)).collect();
            Some(substitute_aliases(target, &|name| local.get(name).cloned()))
        })
}
