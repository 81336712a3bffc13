//! Per-document symbol tables.
//!
//! Functions, class-likes and methods are indexed by normalized name: the
//! last namespace segment, lowercased. PHP resolves these names
//! case-insensitively, and callers rarely know the fully qualified form.

use indexmap::IndexMap;
use phz_parser::{NodeIndex, PhraseKind, SyntaxNode, TokenKind};
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    Function,
    Class,
    Method,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Name as written in the declaration.
    pub name: String,
    /// Normalized name of the containing class-like (methods only).
    pub container: Option<String>,
    /// The declaration phrase.
    pub declaration: NodeIndex,
}

/// Strip the namespace prefix and lowercase.
pub fn normalize_name(name: &str) -> String {
    name.rsplit('\\').next().unwrap_or(name).to_ascii_lowercase()
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    functions: IndexMap<String, SmallVec<[Symbol; 1]>>,
    classes: IndexMap<String, SmallVec<[Symbol; 1]>>,
    methods: IndexMap<String, SmallVec<[Symbol; 2]>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: Symbol) {
        let key = normalize_name(&symbol.name);
        let bucket = match symbol.kind {
            SymbolKind::Function => self.functions.entry(key).or_default(),
            SymbolKind::Class => self.classes.entry(key).or_default(),
            SymbolKind::Method => {
                self.methods.entry(key).or_default().push(symbol);
                return;
            }
        };
        bucket.push(symbol);
    }

    pub fn functions(&self, name: &str) -> &[Symbol] {
        self.functions
            .get(&normalize_name(name))
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    pub fn classes(&self, name: &str) -> &[Symbol] {
        self.classes
            .get(&normalize_name(name))
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// Methods named `name`, in every class-like of the document.
    pub fn methods(&self, name: &str) -> &[Symbol] {
        self.methods
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.functions
            .values()
            .flatten()
            .chain(self.classes.values().flatten())
            .chain(self.methods.values().flatten())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.methods.is_empty()
    }
}

/// Name token declared by a function, method or class-like.
pub fn declared_name<'a>(declaration: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
    let header = declaration.child_of(&[
        PhraseKind::FunctionDeclarationHeader,
        PhraseKind::MethodDeclarationHeader,
        PhraseKind::ClassDeclarationHeader,
    ])?;
    let mut names = header
        .children()
        .filter(|c| c.is_token_of(TokenKind::Name));
    if header.is_phrase_of(&[PhraseKind::ClassDeclarationHeader]) {
        // Skip modifiers and the `class`/`interface`/`trait`/`enum` keyword.
        names.find(|n| {
            ["class", "interface", "trait", "enum"]
                .iter()
                .any(|k| n.text().eq_ignore_ascii_case(k))
        })?;
        names.next()
    } else {
        // Skip the `function` keyword.
        names.nth(1)
    }
}
