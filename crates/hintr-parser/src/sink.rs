//! Bounded diagnostic collection for one linted unit.

use hintr_common::diagnostics::Substitutions;
use hintr_common::{Diagnostic, DiagnosticSeverity, Position};

#[derive(Debug)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    max_errors: usize,
    overflowed: bool,
    /// Closed `ignore:start`/`ignore:end` and `ignore:line` ranges, inclusive.
    ignore_ranges: Vec<(u32, u32)>,
    ignore_open: Option<u32>,
}

impl DiagnosticSink {
    pub fn new(max_errors: usize) -> Self {
        DiagnosticSink {
            diagnostics: Vec::new(),
            max_errors,
            overflowed: false,
            ignore_ranges: Vec::new(),
            ignore_open: None,
        }
    }

    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.max_errors = max_errors;
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// Record a non-fatal diagnostic.
    ///
    /// Returns `false` when the line is ignored or the sink is full. A push
    /// that would go past the limit marks the sink overflowed instead.
    pub fn push(&mut self, code: &'static str, pos: Position, slots: &Substitutions) -> bool {
        let severity = DiagnosticSeverity::from_code(code);
        if severity != DiagnosticSeverity::Error && self.is_ignored(pos.line) {
            return false;
        }
        if self.overflowed {
            return false;
        }
        if self.diagnostics.len() >= self.max_errors {
            self.overflowed = true;
            return false;
        }
        self.diagnostics.push(Diagnostic::new(code, pos, slots));
        true
    }

    /// Record a fatal diagnostic. Never filtered, never counted against the limit.
    pub fn push_fatal(&mut self, code: &'static str, pos: Position, slots: &Substitutions) {
        self.diagnostics.push(Diagnostic::new(code, pos, slots));
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// `ignore:start`. Returns `false` if a region is already open.
    pub fn begin_ignore(&mut self, line: u32) -> bool {
        if self.ignore_open.is_some() {
            return false;
        }
        self.ignore_open = Some(line);
        true
    }

    /// `ignore:end`. Returns `false` if no region is open.
    pub fn end_ignore(&mut self, line: u32) -> bool {
        match self.ignore_open.take() {
            Some(start) => {
                self.ignore_ranges.push((start, line));
                true
            }
            None => false,
        }
    }

    /// `ignore:line`.
    pub fn ignore_line(&mut self, line: u32) {
        self.ignore_ranges.push((line, line));
    }

    fn is_ignored(&self, line: u32) -> bool {
        self.ignore_open.is_some_and(|start| line >= start)
            || self
                .ignore_ranges
                .iter()
                .any(|&(start, end)| start <= line && line <= end)
    }

    /// Apply ignore ranges opened after their lines were reported, attach
    /// evidence and hand the diagnostics over.
    ///
    /// An `ignore:start` never closed extends to the end of the unit.
    pub fn finish(mut self, lines: &[String]) -> Vec<Diagnostic> {
        if let Some(start) = self.ignore_open.take() {
            self.ignore_ranges.push((start, u32::MAX));
        }
        let ranges = std::mem::take(&mut self.ignore_ranges);
        self.diagnostics
            .into_iter()
            .filter(|d| {
                d.severity == DiagnosticSeverity::Error
                    || !ranges.iter().any(|&(s, e)| s <= d.line && d.line <= e)
            })
            .map(|d| match lines.get((d.line as usize).wrapping_sub(1)) {
                Some(text) => d.with_evidence(text.clone()),
                None => d,
            })
            .collect()
    }
}
