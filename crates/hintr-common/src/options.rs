//! Linting option values.
//!
//! Options come from three places (config files, the CLI, and in-source
//! directive comments) and all of them reduce to one of three shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a single linting option.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(i64),
    String(String),
}

impl OptionValue {
    /// Truthiness of the value.
    ///
    /// `false`, `0`, the empty string and the string `"false"` are off;
    /// everything else (including policy strings such as `"vars"`) is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Number(n) => *n != 0,
            OptionValue::String(s) => !s.is_empty() && s != "false",
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            OptionValue::String(s) => s.parse().ok(),
            OptionValue::Bool(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse the textual value used in directive comments.
    ///
    /// `true`/`false` become booleans, integers become numbers, anything else
    /// is kept as a string with surrounding quotes removed.
    #[must_use]
    pub fn parse_directive_value(text: &str) -> Self {
        let text = text.trim();
        match text {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            _ => {
                if let Ok(n) = text.parse::<i64>() {
                    return OptionValue::Number(n);
                }
                let unquoted = text
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
                    .unwrap_or(text);
                OptionValue::String(unquoted.to_string())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::String(s) => f.write_str(s),
        }
    }
}
