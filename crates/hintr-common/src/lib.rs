//! Common types and utilities for the hintr JavaScript linter.
//!
//! This crate provides foundational types used across all hintr crates:
//! - Source positions (`Position`)
//! - Option values (`OptionValue`)
//! - Diagnostic codes, message templates and the `Diagnostic` record
//! - Per-unit summary records (`ImpliedGlobal`, `UnusedBinding`)
//! - Engine limits and thresholds

// Position quad for tokens and diagnostics
pub mod position;
pub use position::Position;

// Option values shared by config files, directives and the engine
pub mod options;
pub use options::OptionValue;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic codes, templates and records
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticSeverity, Substitutions, diagnostic_codes, format_message,
};

// Implied globals / unused bindings produced at the end of a linted unit
pub mod summary;
pub use summary::{BindingKind, ImpliedGlobal, LintSummary, UnusedBinding};

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;
