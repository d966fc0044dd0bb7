//! Per-run lint configuration.

use hintr_common::OptionValue;
use hintr_common::limits::DEFAULT_MAX_ERRORS;
use hintr_parser::{KnownGlobals, OptionError, OptionSet, validate_option};
use rustc_hash::FxHashMap;

/// Base options and globals shared by every unit of a run.
///
/// Directive comments inside a unit layer on top of `options`; they never
/// change the configuration itself.
#[derive(Clone, Debug)]
pub struct LintConfig {
    pub options: OptionSet,
    /// Extra known globals on top of the ECMAScript built-ins.
    pub globals: KnownGlobals,
    /// Non-fatal diagnostics kept before the unit stops with `E043`.
    pub max_errors: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            options: OptionSet::new(),
            globals: KnownGlobals::new(),
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl LintConfig {
    pub fn new() -> Self {
        LintConfig::default()
    }

    /// Build a configuration from option values, checking each against the
    /// option catalog.
    pub fn from_options(values: FxHashMap<String, OptionValue>) -> Result<Self, OptionError> {
        for (name, value) in &values {
            validate_option(name, value)?;
        }
        Ok(LintConfig {
            options: OptionSet::from_map(values),
            ..LintConfig::default()
        })
    }

    /// Set one option, layering it over the current base options.
    #[must_use]
    pub fn with_option(mut self, name: &str, value: OptionValue) -> Self {
        self.options = self.options.derive([(name.to_string(), value)]);
        self
    }

    #[must_use]
    pub fn with_global(mut self, name: &str, writable: bool) -> Self {
        self.globals.insert(name, writable);
        self
    }

    #[must_use]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}
