//! Linting engine for the hintr JavaScript linter.
//!
//! This crate turns a token stream into lint diagnostics:
//! - `events` - the event fabric rules subscribe to
//! - `options` - layered option sets and the option catalog
//! - `directives` - in-source directive comments
//! - `scope` - scope stack, known globals and environments
//! - `sink` - bounded diagnostic collection with ignore regions
//! - `parser` - the parser / linting driver firing events
//!
//! A `ParserState` lints exactly one unit. Units share nothing mutable; the
//! `EventRegistry` is only read during a run and may be shared across
//! threads.

pub mod directives;
pub mod events;
pub mod fault;
pub mod options;
pub mod parser;
pub mod scope;
pub mod sink;

pub use events::{
    EventContext, EventKind, EventRegistry, ExprKind, FunctionMetrics, Listener, Redeclaration,
    RuleContext, StatementKind, UnitState,
};
pub use fault::{InternalFault, RuleFault};
pub use options::{OPTION_CATALOG, OptionError, OptionSet, OptionSpec, OptionType, validate_option};
pub use parser::{ParseOutcome, ParserConfig, ParserState};
pub use scope::{EnvironmentProvider, FrameKind, KnownGlobals, ScopeStack};
pub use sink::DiagnosticSink;

/// Lint `source` with the listeners in `registry`.
pub fn parse_source(
    source: &str,
    registry: &EventRegistry,
    config: ParserConfig<'_>,
) -> Result<ParseOutcome, InternalFault> {
    ParserState::new(source, registry, config).parse()
}

#[cfg(test)]
#[path = "tests/directives_tests.rs"]
mod directives_tests;
#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;
#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod sink_tests;
#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod events_tests;
#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod parser_tests;
