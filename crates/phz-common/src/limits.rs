//! Centralized limits and thresholds for the phz engine.
//!
//! Recursion limits for expression resolution and alias expansion are
//! centralized in `phz_solver::recursion::RecursionProfile` rather than here.
//! This module only holds limits for the front end, the store and the
//! completion layer.

// =============================================================================
// Parser
// =============================================================================

/// Maximum nesting depth the parser descends into before wrapping the rest
/// of a construct in an error phrase.
///
/// # PHP example
///
/// ```php
/// $x = [[[[[[[[[[[[[[ /* ... hundreds of levels ... */ ]]]]]]]]]]]]]];
/// ```
pub const MAX_PARSER_DEPTH: u32 = 1_000;

/// Maximum number of parent hops when walking up the syntax tree.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;

// =============================================================================
// Store
// =============================================================================

/// Files larger than this are not indexed (bytes).
///
/// Mirrors the limit PHP language servers apply to discovered files: huge
/// generated files are rarely the origin of a hand-written array shape.
pub const DEFAULT_MAX_FILE_SIZE: usize = 1024 * 1024;

// =============================================================================
// Completion
// =============================================================================

/// Number of representative numeric indices suggested for list shapes.
pub const DEFAULT_LIST_INDEX_SUGGESTIONS: usize = 5;

/// Width of the zero-padded sort text attached to completion items.
pub const SORT_TEXT_WIDTH: usize = 7;
