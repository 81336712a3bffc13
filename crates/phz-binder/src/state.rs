//! Binder state: collects declarations of one document into a SymbolTable.

use crate::symbols::{Symbol, SymbolKind, SymbolTable, declared_name, normalize_name};
use phz_parser::{ParsedDocument, PhraseKind, SyntaxNode};
use tracing::trace;

pub struct BinderState {
    symbols: SymbolTable,
}

impl BinderState {
    pub fn new() -> Self {
        BinderState {
            symbols: SymbolTable::new(),
        }
    }

    /// Bind every declaration in `doc`, nested ones included (functions
    /// declared inside functions or conditionals are still callable).
    pub fn bind_document(mut self, doc: &ParsedDocument) -> SymbolTable {
        for node in doc.root().descendants() {
            match node.phrase_kind() {
                Some(PhraseKind::FunctionDeclaration) => {
                    self.declare(node, SymbolKind::Function, None);
                }
                Some(
                    PhraseKind::ClassDeclaration
                    | PhraseKind::InterfaceDeclaration
                    | PhraseKind::TraitDeclaration
                    | PhraseKind::EnumDeclaration,
                ) => {
                    self.declare(node, SymbolKind::Class, None);
                }
                Some(PhraseKind::MethodDeclaration) => {
                    let container = enclosing_class_name(node);
                    self.declare(node, SymbolKind::Method, Some(container.unwrap_or_default()));
                }
                _ => {}
            }
        }
        trace!(
            uri = doc.uri(),
            symbols = self.symbols.len(),
            "bound document"
        );
        self.symbols
    }

    fn declare(&mut self, node: SyntaxNode<'_>, kind: SymbolKind, container: Option<String>) {
        let Some(name) = declared_name(node) else {
            return;
        };
        self.symbols.add(Symbol {
            kind,
            name: name.text().to_string(),
            container,
            declaration: node.index(),
        });
    }
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Innermost class-like declaration containing `node`.
pub fn enclosing_class(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    node.ancestors()
        .find(|a| a.phrase_kind().is_some_and(PhraseKind::is_class_like))
}

/// Normalized name of the innermost named class-like containing `node`.
pub fn enclosing_class_name(node: SyntaxNode<'_>) -> Option<String> {
    enclosing_class(node)
        .and_then(declared_name)
        .map(|name| normalize_name(name.text()))
}

/// Normalized name of the base class of the class-like containing `node`.
pub fn enclosing_parent_class_name(node: SyntaxNode<'_>) -> Option<String> {
    let class = enclosing_class(node)?;
    let base = class
        .child_of(&[PhraseKind::ClassDeclarationHeader])
        .unwrap_or(class)
        .child_of(&[PhraseKind::ClassBaseClause])?
        .child_of(&[PhraseKind::QualifiedName])?;
    Some(normalize_name(base.text()))
}
