//! Bundled rules and the `Linter` entry point for hintr.
//!
//! The engine in `hintr-parser` only fires events; everything it reports on
//! its own is structural. The style and correctness checks live here as
//! listeners:
//! - `rules` - the default rule catalog, one module per concern
//! - `environments` - known-globals tables for `browser`, `node` and friends
//! - `config` - `LintConfig`, the per-run base options and globals
//! - `linter` - `Linter`, which owns a registry and lints one unit at a time
//! - `report` - `LintReport`, the serializable result of one unit

pub mod config;
pub mod environments;
pub mod linter;
pub mod report;
pub mod rules;

pub use config::LintConfig;
pub use environments::{BundledEnvironments, standard_globals};
pub use linter::Linter;
pub use report::LintReport;
pub use rules::register_default_rules;

#[cfg(test)]
#[path = "tests/environments_tests.rs"]
mod environments_tests;
#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod rules_tests;
#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod report_tests;
