//! Declaration/document store.
//!
//! `DeclarationStore` is the lookup surface resolution runs against.
//! `ProjectStore` implements it over a set of parsed documents, each bound
//! to a symbol table when added. The store is read-only once built and can
//! be shared between concurrent requests.

use crate::reference::Reference;
use crate::scope::variable_declaration;
use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolTable, normalize_name};
use phz_parser::{DocId, ParsedDocument, SyntaxNode};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

pub trait DeclarationStore {
    /// Declarations a reference may denote. Ambiguity yields several.
    fn declarations<'a>(&'a self, reference: &Reference) -> Vec<SyntaxNode<'a>>;

    /// Class-like declarations named `fqn` (namespace prefix ignored).
    fn declarations_by_fqn<'a>(&'a self, fqn: &str) -> Vec<SyntaxNode<'a>>;

    /// Token at `offset` in document `uri`.
    fn locate<'a>(&'a self, uri: &str, offset: u32) -> Option<SyntaxNode<'a>>;
}

#[derive(Default)]
pub struct ProjectStore {
    documents: Vec<ParsedDocument>,
    symbols: Vec<SymbolTable>,
    by_uri: FxHashMap<String, usize>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = ParsedDocument>) -> Self {
        let mut store = Self::new();
        for doc in documents {
            store.add_document(doc);
        }
        store
    }

    /// Add (or replace, by URI) a document.
    pub fn add_document(&mut self, mut doc: ParsedDocument) -> DocId {
        let symbols = BinderState::new().bind_document(&doc);
        if let Some(&slot) = self.by_uri.get(doc.uri()) {
            let id = DocId(slot as u32);
            doc.set_id(id);
            debug!(uri = doc.uri(), "replacing document");
            self.documents[slot] = doc;
            self.symbols[slot] = symbols;
            return id;
        }
        let slot = self.documents.len();
        let id = DocId(slot as u32);
        doc.set_id(id);
        self.by_uri.insert(doc.uri().to_string(), slot);
        self.documents.push(doc);
        self.symbols.push(symbols);
        id
    }

    /// Parse and add a document.
    pub fn add_source(&mut self, uri: impl Into<String>, text: impl Into<String>) -> DocId {
        self.add_document(ParsedDocument::parse(uri, text))
    }

    pub fn document(&self, id: DocId) -> Option<&ParsedDocument> {
        self.documents.get(id.0 as usize)
    }

    pub fn document_by_uri(&self, uri: &str) -> Option<&ParsedDocument> {
        self.by_uri.get(uri).map(|slot| &self.documents[*slot])
    }

    pub fn documents(&self) -> impl Iterator<Item = &ParsedDocument> {
        self.documents.iter()
    }

    pub fn symbols(&self, id: DocId) -> Option<&SymbolTable> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Declarations selected from every document's symbol table.
    fn collect<'a>(
        &'a self,
        select: impl Fn(&'a SymbolTable) -> &'a [Symbol],
        keep: impl Fn(&Symbol) -> bool,
    ) -> Vec<SyntaxNode<'a>> {
        let mut found = Vec::new();
        for (doc, table) in self.documents.iter().zip(&self.symbols) {
            for symbol in select(table) {
                if keep(symbol)
                    && let Some(node) = doc.node(symbol.declaration)
                {
                    found.push(node);
                }
            }
        }
        found
    }
}

impl DeclarationStore for ProjectStore {
    fn declarations<'a>(&'a self, reference: &Reference) -> Vec<SyntaxNode<'a>> {
        let found = match reference {
            Reference::Function { name } => self.collect(|t| t.functions(name), |_| true),
            Reference::Class { name } => self.collect(|t| t.classes(name), |_| true),
            Reference::Method { class: None, name } => {
                self.collect(|t| t.methods(name), |_| true)
            }
            Reference::Method {
                class: Some(class),
                name,
            } => {
                let exact = self.collect(
                    |t| t.methods(name),
                    |s| s.container.as_deref() == Some(class.as_str()),
                );
                // Inherited or trait methods: the named class does not
                // declare it, so any class' method of that name may apply.
                if exact.is_empty() {
                    self.collect(|t| t.methods(name), |_| true)
                } else {
                    exact
                }
            }
            Reference::Variable { name, scope } => self
                .document(scope.doc)
                .and_then(|doc| doc.node(scope.node))
                .and_then(|scope| variable_declaration(scope, name))
                .into_iter()
                .collect(),
        };
        trace!(?reference, count = found.len(), "declarations");
        found
    }

    fn declarations_by_fqn<'a>(&'a self, fqn: &str) -> Vec<SyntaxNode<'a>> {
        let name = normalize_name(fqn);
        self.collect(|t| t.classes(&name), |_| true)
    }

    fn locate<'a>(&'a self, uri: &str, offset: u32) -> Option<SyntaxNode<'a>> {
        self.document_by_uri(uri)?.token_at(offset)
    }
}
