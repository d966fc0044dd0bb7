//! `Linter`: a rule registry plus configuration, linting one unit per call.

use crate::config::LintConfig;
use crate::environments::{BundledEnvironments, standard_globals};
use crate::report::LintReport;
use crate::rules::register_default_rules;
use hintr_parser::{EventRegistry, InternalFault, ParserConfig, parse_source};
use tracing::{Level, debug, span};

/// Lints source units against a fixed set of rules.
///
/// `lint` only reads the linter, so one instance can serve many threads;
/// every call builds its own engine state.
#[derive(Debug)]
pub struct Linter {
    registry: EventRegistry,
    environments: BundledEnvironments,
    config: LintConfig,
}

impl Default for Linter {
    fn default() -> Self {
        Linter::new(LintConfig::default())
    }
}

impl Linter {
    /// A linter running the bundled rules.
    pub fn new(config: LintConfig) -> Self {
        let mut registry = EventRegistry::new();
        register_default_rules(&mut registry);
        Linter::with_registry(config, registry)
    }

    /// A linter running exactly the listeners in `registry`.
    pub fn with_registry(config: LintConfig, registry: EventRegistry) -> Self {
        Linter {
            registry,
            environments: BundledEnvironments,
            config,
        }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Register additional listeners before linting.
    pub fn registry_mut(&mut self) -> &mut EventRegistry {
        &mut self.registry
    }

    /// Lint `source`, reporting it under `file`.
    ///
    /// Lint findings, fatal ones included, are part of the report. `Err`
    /// means a listener or the engine itself failed.
    pub fn lint(&self, file: &str, source: &str) -> Result<LintReport, InternalFault> {
        let _span = span!(Level::DEBUG, "lint_unit", file).entered();

        let mut globals = standard_globals();
        globals.extend(
            self.config
                .globals
                .iter()
                .map(|(name, writable)| (name.to_string(), writable)),
        );
        let parser_config = ParserConfig {
            options: self.config.options.clone(),
            globals,
            max_errors: self.config.max_errors,
            environments: Some(&self.environments),
        };
        let outcome = parse_source(source, &self.registry, parser_config)?;
        debug!(
            diagnostics = outcome.diagnostics.len(),
            aborted = outcome.aborted,
            "unit linted"
        );
        Ok(LintReport::new(file, outcome))
    }
}
