//! Reserved-word recognition.
//!
//! Both matchers are compiled once per process. An identifier's decoded text
//! is tested against them after it has been scanned; the scanner then decides
//! whether the word becomes a keyword token based on its position.

use crate::syntax_kind::SyntaxKind;
use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "^(?:break|case|catch|class|const|continue|debugger|default|delete|do|else|enum|\
         export|extends|false|finally|for|function|if|import|in|instanceof|new|null|\
         return|super|switch|this|throw|true|try|typeof|var|void|while|with)$",
    )
    .expect("keyword pattern is a valid regex")
});

static STRICT_RESERVED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^(?:implements|interface|let|package|private|protected|public|static|yield)$")
        .expect("strict reserved pattern is a valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordClass {
    /// Always reserved; scanned as the given keyword outside property position.
    Keyword(SyntaxKind),
    /// Reserved only in strict mode code; scanned as an identifier.
    StrictReserved,
    Plain,
}

pub fn classify_word(word: &str) -> WordClass {
    if KEYWORD_PATTERN.is_match(word) {
        if let Some(kind) = SyntaxKind::keyword_from_str(word) {
            return WordClass::Keyword(kind);
        }
    }
    if STRICT_RESERVED_PATTERN.is_match(word) {
        return WordClass::StrictReserved;
    }
    WordClass::Plain
}

pub fn is_reserved_word(word: &str) -> bool {
    !matches!(classify_word(word), WordClass::Plain)
}
