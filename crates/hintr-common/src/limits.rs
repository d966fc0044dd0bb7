//! Centralized limits and thresholds for the linting engine.
//!
//! These are defaults; `max_errors` can be overridden per run through the
//! `maxerr` option or the `LintConfig` handed to the engine.

// =============================================================================
// Diagnostic Limits
// =============================================================================

/// Default number of diagnostics after which linting of a unit stops.
///
/// When the limit is exceeded the engine records one extra fatal
/// `E043` ("Too many errors.") diagnostic and aborts the unit.
pub const DEFAULT_MAX_ERRORS: usize = 50;

// =============================================================================
// Recursion Depth Limits (Parser)
// =============================================================================

/// Maximum nesting depth of statements and expressions.
///
/// Each nested block, parenthesis, array or call adds one level. Past this
/// depth the parser raises a fatal diagnostic instead of overflowing the
/// stack on pathological input such as `((((((...))))))`. Levels below the
/// bound grow the stack on demand, so the depth is reachable from threads
/// with small default stacks.
pub const MAX_NESTING_DEPTH: u32 = 512;

/// Remaining stack below which a nesting level moves to a fresh segment.
pub const STACK_RED_ZONE: usize = 256 * 1024;

/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

// =============================================================================
// Scope Limits
// =============================================================================

/// Upper bound on scope-chain walks.
///
/// Scope frames form a stack, so a walk can never exceed the stack height;
/// the bound protects against accidental cycles if frames are ever linked.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;
