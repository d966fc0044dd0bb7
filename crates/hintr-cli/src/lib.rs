//! Native CLI support for the `hintr` binary.
//!
//! - `args` - command-line arguments
//! - `config` - `.hintrc` lookup, `extends` chains and option validation
//! - `fs` - file discovery and source loading
//! - `driver` - parallel batch linting
//! - `reporter` - default, unix and JSON output
//! - `tracing_config` - opt-in log subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod fs;
pub mod reporter;
pub mod tracing_config;

/// No diagnostics (or only warnings within `--max-warnings`).
pub const EXIT_CLEAN: u8 = 0;
/// At least one lint finding.
pub const EXIT_FINDINGS: u8 = 1;
/// Configuration error, I/O failure or internal fault.
pub const EXIT_FAULT: u8 = 2;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/fs_tests.rs"]
mod fs_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
