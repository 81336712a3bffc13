//! Recursion guard for backward resolution and alias expansion.
//!
//! Resolution follows calls, variables and aliases wherever they lead, so
//! a request must stop on its own. The guard keeps the set of keys in
//! progress, a depth counter and a running count of entries. Entering a
//! key that is already in progress is a cycle; passing either bound is a
//! limit hit. Callers treat every denial as "nothing known".
//!
//! Debug builds panic when a guard is dropped while keys are still in
//! progress, or when a key is left without having been entered.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Limits of one guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// One key per syntax node under resolution. A single source construct
    /// may nest several levels (call, return, variable, assignment), hence
    /// the generous depth.
    ///
    /// depth = 500, entries = 100,000
    ExpressionResolution,

    /// One key per alias name under expansion.
    ///
    /// depth = 32, entries = 10,000
    AliasExpansion,

    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::ExpressionResolution => 500,
            Self::AliasExpansion => 32,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::ExpressionResolution => 100_000,
            Self::AliasExpansion => 10_000,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    pub fn is_entered(self) -> bool {
        self == Self::Entered
    }

    pub fn is_cycle(self) -> bool {
        self == Self::Cycle
    }

    pub fn is_exceeded(self) -> bool {
        matches!(self, Self::DepthExceeded | Self::IterationExceeded)
    }
}

pub struct RecursionGuard<K: Hash + Eq> {
    in_progress: FxHashSet<K>,
    entries: u32,
    profile: RecursionProfile,
    limit_hit: bool,
}

impl<K: Hash + Eq> RecursionGuard<K> {
    pub fn with_profile(profile: RecursionProfile) -> Self {
        RecursionGuard {
            in_progress: FxHashSet::default(),
            entries: 0,
            profile,
            limit_hit: false,
        }
    }

    /// Every attempt counts towards the entry bound, denied ones included.
    /// `Entered` must be paired with exactly one [`leave`](Self::leave).
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.entries = self.entries.saturating_add(1);
        let denied = if self.entries > self.profile.max_iterations() {
            RecursionResult::IterationExceeded
        } else if self.depth() >= self.profile.max_depth() {
            RecursionResult::DepthExceeded
        } else if self.in_progress.contains(&key) {
            return RecursionResult::Cycle;
        } else {
            self.in_progress.insert(key);
            return RecursionResult::Entered;
        };
        self.limit_hit = true;
        denied
    }

    pub fn leave(&mut self, key: &K) {
        let removed = self.in_progress.remove(key);
        debug_assert!(removed, "RecursionGuard::leave without a matching enter");
    }

    pub fn depth(&self) -> u32 {
        self.in_progress.len() as u32
    }

    /// Sticky once any bound was passed. Cycles do not count.
    pub fn is_exceeded(&self) -> bool {
        self.limit_hit
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert!(
                self.in_progress.is_empty(),
                "RecursionGuard dropped with {} keys still in progress",
                self.in_progress.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(max_depth: u32, max_iterations: u32) -> RecursionGuard<u32> {
        RecursionGuard::with_profile(RecursionProfile::Custom {
            max_depth,
            max_iterations,
        })
    }

    #[test]
    fn profile_limits() {
        let p = RecursionProfile::ExpressionResolution;
        assert_eq!((p.max_depth(), p.max_iterations()), (500, 100_000));
        let p = RecursionProfile::AliasExpansion;
        assert_eq!((p.max_depth(), p.max_iterations()), (32, 10_000));
    }

    #[test]
    fn enter_and_leave_track_depth() {
        let mut g = guard(10, 100);
        assert!(g.enter(1).is_entered());
        assert!(g.enter(2).is_entered());
        assert_eq!(g.depth(), 2);
        g.leave(&2);
        g.leave(&1);
        assert_eq!(g.depth(), 0);
    }

    #[test]
    fn reentering_a_key_is_a_cycle_not_a_limit() {
        let mut g = guard(10, 100);
        assert!(g.enter(7).is_entered());
        assert!(g.enter(7).is_cycle());
        assert!(!g.is_exceeded());
        g.leave(&7);
        // Finished keys may be entered again.
        assert!(g.enter(7).is_entered());
        g.leave(&7);
    }

    #[test]
    fn alias_names_as_keys() {
        let mut g = RecursionGuard::with_profile(RecursionProfile::AliasExpansion);
        assert!(g.enter("Row".to_string()).is_entered());
        assert!(g.enter("Row".to_string()).is_cycle());
        g.leave(&"Row".to_string());
    }

    #[test]
    fn depth_limit_is_sticky() {
        let mut g = guard(2, 100);
        assert!(g.enter(1).is_entered());
        assert!(g.enter(2).is_entered());
        assert_eq!(g.enter(3), RecursionResult::DepthExceeded);
        g.leave(&2);
        g.leave(&1);
        assert!(g.is_exceeded());
        assert!(g.enter(3).is_entered());
        g.leave(&3);
        assert!(g.is_exceeded());
    }

    #[test]
    fn denied_attempts_count_towards_entries() {
        let mut g = guard(10, 3);
        assert!(g.enter(1).is_entered());
        assert!(g.enter(1).is_cycle());
        g.leave(&1);
        assert!(g.enter(2).is_entered());
        g.leave(&2);
        assert_eq!(g.enter(3), RecursionResult::IterationExceeded);
        assert!(g.enter(4).is_exceeded());
    }
}
