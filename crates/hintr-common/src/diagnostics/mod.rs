//! Diagnostic types and message lookup.
//!
//! Message data lives in `data.rs`. Every code is a short string whose first
//! character classifies its severity (`E`, `W` or `I`); templates use the
//! named placeholders `{a}` through `{d}`, filled from a [`Substitutions`]
//! array in slot order.

use crate::position::Position;
use serde::Serialize;
use std::fmt;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

impl DiagnosticSeverity {
    /// Severity of a code, derived from its first character.
    ///
    /// This is a fixed, total mapping: `E` is an error, `I` is informational
    /// and everything else is a warning.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.as_bytes().first() {
            Some(b'E') => DiagnosticSeverity::Error,
            Some(b'I') => DiagnosticSeverity::Info,
            _ => DiagnosticSeverity::Warning,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four ordered substitution slots `{a}`, `{b}`, `{c}` and `{d}`.
pub type Substitutions = [Option<String>; 4];

/// A diagnostic message definition with code and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: &'static str,
    pub message: &'static str,
}

impl DiagnosticMessage {
    pub fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::from_code(self.code)
    }
}

/// A single linting finding.
///
/// Diagnostics are append-only records: once the engine has produced one it
/// is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: DiagnosticSeverity,
    pub line: u32,
    pub character: u32,
    pub from: u32,
    pub offset: u32,
    /// The unresolved message template.
    pub template: &'static str,
    /// The message with its placeholders filled in.
    pub message: String,
    /// Text of the source line the diagnostic points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Diagnostic {
    /// Build a diagnostic for `code` at `pos`.
    ///
    /// Unknown codes keep the code itself as their template so that a typo
    /// in a rule is visible in the output rather than silently dropped.
    #[must_use]
    pub fn new(code: &'static str, pos: Position, substitutions: &Substitutions) -> Self {
        let template = get_message_template(code).unwrap_or(code);
        Self {
            code,
            severity: DiagnosticSeverity::from_code(code),
            line: pos.line,
            character: pos.character,
            from: pos.from,
            offset: pos.offset,
            template,
            message: format_message(template, substitutions),
            evidence: None,
        }
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.character, self.offset, self.from)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, col {}, {} ({})",
            self.line, self.character, self.message, self.code
        )
    }
}

/// Fill `{a}`..`{d}` placeholders from `substitutions` in slot order.
///
/// Slots beyond the template's placeholders are ignored; a placeholder whose
/// slot is empty renders as the empty string. Braces that do not form one of
/// the four placeholders are copied through unchanged.
#[must_use]
pub fn format_message(template: &str, substitutions: &Substitutions) -> String {
    let mut result = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];
        let slot = tail
            .as_bytes()
            .get(1)
            .filter(|_| tail.as_bytes().get(2) == Some(&b'}'))
            .and_then(|b| match *b {
                b'a' => Some(0),
                b'b' => Some(1),
                b'c' => Some(2),
                b'd' => Some(3),
                _ => None,
            });
        match slot {
            Some(index) => {
                if let Some(value) = &substitutions[index] {
                    result.push_str(value);
                }
                rest = &tail[3..];
            }
            None => {
                result.push('{');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: &str) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: &str) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Convenience for building a [`Substitutions`] array from string slices.
#[must_use]
pub fn substitutions(values: &[&str]) -> Substitutions {
    let mut slots: Substitutions = Default::default();
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = Some((*value).to_string());
    }
    slots
}
