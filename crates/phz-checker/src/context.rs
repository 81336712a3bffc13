//! `ResolutionContext`: per-request state of backward resolution.
//!
//! Every resolver reaches the store and recurses through this context. The
//! context owns the recursion guard keyed by syntax-node identity, so a
//! node already being resolved further up the stack contributes nothing
//! instead of looping.

use crate::resolvers::STRATEGIES;
use phz_binder::{DeclarationStore, Reference};
use phz_parser::{NodeKey, SyntaxNode};
use phz_solver::{RecursionGuard, RecursionProfile, RecursionResult, Type};
use std::cell::RefCell;
use tracing::trace;

/// Minimum stack left before resolution grows it.
const STACK_RED_ZONE: usize = 32 * 1024;
/// Size of each stack segment added on growth.
const STACK_GROWTH: usize = 2 * 1024 * 1024;

pub struct ResolutionContext<'s> {
    store: &'s dyn DeclarationStore,
    guard: RefCell<RecursionGuard<NodeKey>>,
}

impl<'s> ResolutionContext<'s> {
    pub fn new(store: &'s dyn DeclarationStore) -> Self {
        Self::with_profile(store, RecursionProfile::ExpressionResolution)
    }

    pub fn with_profile(store: &'s dyn DeclarationStore, profile: RecursionProfile) -> Self {
        ResolutionContext {
            store,
            guard: RefCell::new(RecursionGuard::with_profile(profile)),
        }
    }

    pub fn store(&self) -> &'s dyn DeclarationStore {
        self.store
    }

    pub fn locate(&self, uri: &str, offset: u32) -> Option<SyntaxNode<'s>> {
        self.store.locate(uri, offset)
    }

    pub fn declarations_of(&self, reference: &Reference) -> Vec<SyntaxNode<'s>> {
        self.store.declarations(reference)
    }

    pub fn declarations_by_fqn(&self, fqn: &str) -> Vec<SyntaxNode<'s>> {
        self.store.declarations_by_fqn(fqn)
    }

    /// Whether a limit was hit at any point of this request.
    pub fn limit_exceeded(&self) -> bool {
        self.guard.borrow().is_exceeded()
    }

    /// Every shape `expr` may have. Strategies run in a fixed order and
    /// their results are concatenated; an empty result means unknown.
    #[tracing::instrument(level = "trace", skip_all, fields(expr = ?expr))]
    pub fn resolve(&self, expr: SyntaxNode<'s>) -> Vec<Type> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.resolve_guarded(expr))
    }

    fn resolve_guarded(&self, expr: SyntaxNode<'s>) -> Vec<Type> {
        let key = expr.key();
        let entered = self.guard.borrow_mut().enter(key);
        if entered != RecursionResult::Entered {
            trace!(?expr, ?entered, "resolution denied");
            return Vec::new();
        }

        let mut types = Vec::new();
        for (name, strategy) in STRATEGIES {
            let found = strategy(expr, self);
            if !found.is_empty() {
                trace!(strategy = *name, count = found.len(), "strategy matched");
            }
            types.extend(found);
        }

        self.guard.borrow_mut().leave(&key);
        types
    }
}
