//! Lexical errors.
//!
//! A `LexError` always ends scanning of the unit: the scanner cannot tell
//! where a malformed token ends, so nothing after it can be tokenized
//! reliably.

use hintr_common::diagnostics::{Substitutions, diagnostic_codes, substitutions};
use hintr_common::Position;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedComment,
    UnterminatedRegExp,
    InvalidRegExpFlag(char),
    InvalidEscape(String),
    MalformedNumber(String),
    InvalidCharacter(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub pos: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, pos: Position) -> Self {
        LexError { kind, pos }
    }

    /// Diagnostic code reported for this error.
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnterminatedString => diagnostic_codes::UNCLOSED_STRING,
            LexErrorKind::UnterminatedTemplate => diagnostic_codes::UNCLOSED_TEMPLATE,
            LexErrorKind::UnterminatedComment => diagnostic_codes::UNCLOSED_COMMENT,
            LexErrorKind::UnterminatedRegExp => diagnostic_codes::UNCLOSED_REGEXP,
            LexErrorKind::InvalidRegExpFlag(_) => diagnostic_codes::INVALID_REGEXP_FLAG,
            LexErrorKind::InvalidEscape(_) => diagnostic_codes::BAD_ESCAPE,
            LexErrorKind::MalformedNumber(_) => diagnostic_codes::MALFORMED_NUMBER,
            LexErrorKind::InvalidCharacter(_) => diagnostic_codes::UNEXPECTED,
        }
    }

    pub fn substitutions(&self) -> Substitutions {
        match &self.kind {
            LexErrorKind::InvalidRegExpFlag(c) | LexErrorKind::InvalidCharacter(c) => {
                substitutions(&[c.to_string().as_str()])
            }
            LexErrorKind::InvalidEscape(text) | LexErrorKind::MalformedNumber(text) => {
                substitutions(&[text])
            }
            _ => Default::default(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = hintr_common::diagnostics::get_message_template(self.code())
            .map(|template| hintr_common::format_message(template, &self.substitutions()))
            .unwrap_or_default();
        write!(
            f,
            "{} at line {}, column {}",
            message, self.pos.line, self.pos.character
        )
    }
}

impl std::error::Error for LexError {}
