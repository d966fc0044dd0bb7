//! The result of linting one unit.

use hintr_common::{Diagnostic, DiagnosticSeverity, LintSummary};
use hintr_parser::ParseOutcome;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct LintReport {
    /// Name the unit was linted under (a path for the CLI).
    pub file: String,
    /// Diagnostics in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: LintSummary,
    /// Linting stopped early; the last diagnostic is the fatal one.
    pub aborted: bool,
    pub lines_scanned: u32,
}

impl LintReport {
    pub fn new(file: impl Into<String>, outcome: ParseOutcome) -> Self {
        LintReport {
            file: file.into(),
            diagnostics: outcome.diagnostics,
            summary: outcome.summary,
            aborted: outcome.aborted,
            lines_scanned: outcome.lines_scanned,
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(DiagnosticSeverity::Info)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }

    /// No diagnostics of any severity.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Codes in report order, for quick comparisons.
    pub fn codes(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(|diagnostic| diagnostic.code).collect()
    }
}
