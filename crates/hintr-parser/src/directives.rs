//! Directive comments.
//!
//! ```text
//! /*jshint eqeqeq:true, maxlen:80, -W098 */
//! /*global $, jQuery:true, -console */
//! /*exported init */
//! // jshint ignore:line
//! /* falls through */
//! ```
//!
//! A directive is a marker word at the start of a comment followed by a
//! comma separated list of `name:value` pairs or bare names. This module only
//! recognizes the syntax; the parser decides what each entry means.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(jshint|jslint|hintr|globals?|exported)(?:\s+(.*))?$")
        .expect("directive marker pattern is a valid regex")
});

static FALLS_THROUGH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*falls?\s?thr(?:ough|u)\.?\s*$")
        .expect("falls-through pattern is a valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `jshint`, `jslint`, `hintr`: option overrides.
    Options,
    /// `global`, `globals`: known-global declarations.
    Globals,
    /// `exported`: top-level bindings used from elsewhere.
    Exported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveEntry {
    pub name: String,
    /// Raw value text; `None` for a bare name.
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub entries: SmallVec<[DirectiveEntry; 4]>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentDirective {
    Directive(Directive),
    /// `/* falls through */` before a `case`.
    FallsThrough,
    /// A directive marker followed by an entry that cannot be parsed.
    Malformed(String),
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-' | '+' | '.'))
}

/// Recognize a directive in a comment body (delimiters already stripped).
pub fn parse_comment(body: &str) -> Option<CommentDirective> {
    if FALLS_THROUGH_PATTERN.is_match(body) {
        return Some(CommentDirective::FallsThrough);
    }
    let captures = MARKER_PATTERN.captures(body)?;
    let kind = match &captures[1] {
        "global" | "globals" => DirectiveKind::Globals,
        "exported" => DirectiveKind::Exported,
        _ => DirectiveKind::Options,
    };
    let list = captures.get(2).map_or("", |m| m.as_str());

    let mut entries = SmallVec::new();
    for piece in list.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if let Some((name, value)) = piece.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if !is_valid_name(name) || value.is_empty() || value.contains(':') {
                return Some(CommentDirective::Malformed(piece.to_string()));
            }
            entries.push(DirectiveEntry {
                name: name.to_string(),
                value: Some(value.to_string()),
            });
        } else {
            for name in piece.split_whitespace() {
                if !is_valid_name(name) {
                    return Some(CommentDirective::Malformed(name.to_string()));
                }
                entries.push(DirectiveEntry {
                    name: name.to_string(),
                    value: None,
                });
            }
        }
    }

    Some(CommentDirective::Directive(Directive { kind, entries }))
}
