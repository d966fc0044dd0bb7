use colored::Colorize;
use hintr_checker::LintReport;
use hintr_common::{Diagnostic, DiagnosticSeverity};
use serde::Serialize;

use crate::args::ReporterKind;
use crate::driver::{FileOutcome, RunResult};

pub struct Reporter {
    kind: ReporterKind,
    color: bool,
    verbose: bool,
    show_summary: bool,
}

impl Reporter {
    pub fn new(kind: ReporterKind, color: bool) -> Self {
        Reporter {
            kind,
            color,
            verbose: false,
            show_summary: false,
        }
    }

    /// Append codes such as `(W033)` to messages.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Also print implied globals and unused bindings.
    #[must_use]
    pub fn show_summary(mut self, show_summary: bool) -> Self {
        self.show_summary = show_summary;
        self
    }

    /// Render the whole run for stdout.
    pub fn render(&self, run: &RunResult) -> String {
        match self.kind {
            ReporterKind::Json => self.render_json(run),
            ReporterKind::Default | ReporterKind::Unix => self.render_text(run),
        }
    }

    fn render_text(&self, run: &RunResult) -> String {
        let mut out = String::new();
        for report in run.reports() {
            for diagnostic in &report.diagnostics {
                out.push_str(&self.format_diagnostic(&report.file, diagnostic));
                out.push('\n');
            }
            if self.show_summary {
                out.push_str(&self.format_summary(report));
            }
        }

        let total = run.error_count() + run.warning_count() + run.info_count();
        if self.kind == ReporterKind::Default && total > 0 {
            out.push('\n');
            out.push_str(&self.format_totals(run, total));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&self, file: &str, diagnostic: &Diagnostic) -> String {
        let code = if self.verbose {
            format!(" ({})", self.format_code(diagnostic))
        } else {
            String::new()
        };
        match self.kind {
            ReporterKind::Unix => format!(
                "{}:{}:{}: {}{}",
                file, diagnostic.line, diagnostic.character, diagnostic.message, code
            ),
            _ => format!(
                "{}: line {}, col {}, {}{}",
                self.format_file(file),
                diagnostic.line,
                diagnostic.character,
                diagnostic.message,
                code
            ),
        }
    }

    fn format_summary(&self, report: &LintReport) -> String {
        let mut out = String::new();
        let file = self.format_file(&report.file);
        for global in &report.summary.implied_globals {
            let lines: Vec<String> = global.lines.iter().map(u32::to_string).collect();
            out.push_str(&format!(
                "{file}: implied global '{}' (line {})\n",
                global.name,
                lines.join(", ")
            ));
        }
        for unused in &report.summary.unused {
            out.push_str(&format!(
                "{file}: unused {} '{}' (line {}, col {})\n",
                unused.kind, unused.name, unused.line, unused.character
            ));
        }
        out
    }

    fn format_totals(&self, run: &RunResult, total: usize) -> String {
        let line = format!(
            "{} ({}, {})",
            plural(total, "problem"),
            plural(run.error_count(), "error"),
            plural(run.warning_count(), "warning")
        );
        if !self.color {
            return line;
        }
        if run.error_count() > 0 {
            line.red().bold().to_string()
        } else {
            line.yellow().bold().to_string()
        }
    }

    fn format_file(&self, file: &str) -> String {
        if self.color {
            file.bold().to_string()
        } else {
            file.to_string()
        }
    }

    fn format_code(&self, diagnostic: &Diagnostic) -> String {
        if !self.color || self.kind == ReporterKind::Unix {
            return diagnostic.code.to_string();
        }
        match diagnostic.severity {
            DiagnosticSeverity::Error => diagnostic.code.red().to_string(),
            DiagnosticSeverity::Warning => diagnostic.code.yellow().to_string(),
            DiagnosticSeverity::Info => diagnostic.code.cyan().to_string(),
        }
    }

    fn render_json(&self, run: &RunResult) -> String {
        let files = run
            .files
            .iter()
            .map(|file| {
                let path = file.path.display().to_string();
                match &file.outcome {
                    FileOutcome::Linted(report) => JsonFile::Linted { path, report },
                    FileOutcome::Skipped => JsonFile::Skipped { path },
                    FileOutcome::Failed(fault) => JsonFile::Failed { path, fault },
                }
            })
            .collect();
        let output = JsonRun {
            files,
            errors: run.error_count(),
            warnings: run.warning_count(),
            infos: run.info_count(),
        };
        let mut json = serde_json::to_string_pretty(&output).unwrap_or_default();
        json.push('\n');
        json
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[derive(Serialize)]
struct JsonRun<'a> {
    files: Vec<JsonFile<'a>>,
    errors: usize,
    warnings: usize,
    infos: usize,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonFile<'a> {
    Linted {
        path: String,
        report: &'a LintReport,
    },
    Skipped {
        path: String,
    },
    Failed {
        path: String,
        fault: &'a str,
    },
}
