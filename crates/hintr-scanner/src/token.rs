//! Positioned tokens.

use crate::syntax_kind::{SyntaxKind, TokenCategory};
use bitflags::bitflags;
use hintr_common::Position;

bitflags! {
    /// Facts about a token that rules may care about but that do not change
    /// how it is parsed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        /// A line terminator appeared between this token and the previous one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// The identifier was spelled with `\u` escapes.
        const UNICODE_ESCAPE = 1 << 1;
        /// The identifier is reserved in strict mode code.
        const STRICT_RESERVED = 1 << 2;
        /// The word follows `.` or `?.`, so reserved words are plain names.
        const PROPERTY_NAME = 1 << 3;
        /// Number written as `.5`.
        const LEADING_DECIMAL = 1 << 4;
        /// Number written as `5.`.
        const TRAILING_DECIMAL = 1 << 5;
        /// Number written as `017` or `089`.
        const LEGACY_OCTAL = 1 << 6;
        /// String contains a `\0`-`\9` style legacy escape.
        const OCTAL_ESCAPE = 1 << 7;
        /// String continues over a line via a backslash-newline.
        const MULTILINE = 1 << 8;
        /// Number carries the `n` suffix.
        const BIGINT = 1 << 9;
    }
}

/// Decoded payload of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    #[default]
    None,
    /// Decoded identifier or keyword text.
    Name(String),
    /// Post-escape string contents and the quote character used.
    Str { value: String, quote: char },
    Number(f64),
    RegExp { body: String, flags: String },
    /// Cooked text of a template fragment.
    Template(String),
    /// Comment body without its delimiters.
    Comment(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Raw source text, including quotes and delimiters.
    pub text: String,
    pub value: TokenValue,
    pub pos: Position,
    /// Line on which the token ends; differs from `pos.line` for multi-line
    /// strings, templates and block comments.
    pub end_line: u32,
    pub flags: TokenFlags,
}

impl Token {
    pub fn end_of_file(pos: Position) -> Self {
        Token {
            kind: SyntaxKind::EndOfFileToken,
            text: String::new(),
            value: TokenValue::None,
            pos,
            end_line: pos.line,
            flags: TokenFlags::empty(),
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Decoded name of an identifier or keyword; the raw text otherwise.
    pub fn name(&self) -> &str {
        match &self.value {
            TokenValue::Name(name) => name,
            _ => &self.text,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str { value, .. } | TokenValue::Template(value) => Some(value),
            _ => None,
        }
    }

    pub fn quote(&self) -> Option<char> {
        match &self.value {
            TokenValue::Str { quote, .. } => Some(*quote),
            _ => None,
        }
    }

    pub fn number_value(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Text used when a diagnostic quotes this token.
    pub fn display_text(&self) -> &str {
        if self.kind == SyntaxKind::EndOfFileToken {
            "(end)"
        } else {
            &self.text
        }
    }
}
