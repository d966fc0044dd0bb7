//! JavaScript scanner/tokenizer for the hintr linter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token kinds
//! - `Token` - Positioned tokens with decoded values and flags
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` / `unicode_tables` - Identifier character classification

pub mod char_codes;
pub mod unicode_tables;

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, TokenCategory};

pub mod reserved;
pub use reserved::{WordClass, classify_word, is_reserved_word};

pub mod token;
pub use token::{Token, TokenFlags, TokenValue};

pub mod error;
pub use error::{LexError, LexErrorKind};

pub mod scanner;
pub use scanner::{ScannerSnapshot, ScannerState};

/// Tokenize a whole buffer, comments included, stopping at the first lex
/// error. The end-of-input token is not part of the result.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut scanner = ScannerState::new(source);
    scanner.scan_shebang_trivia();
    scanner.collect()
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "tests/unicode_tables_tests.rs"]
mod unicode_tables_tests;
