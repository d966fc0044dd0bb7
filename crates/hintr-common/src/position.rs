//! Source positions.
//!
//! Every token and every diagnostic carries the same four numbers:
//!
//! - `line`: 1-based line on which the token starts
//! - `character`: 1-based column of the token's first character
//! - `offset`: 0-based character (not byte) offset into the source
//! - `from`: 1-based column at which scanning resumes after the token, measured
//!   on the token's last line. For single-line tokens this is the column just
//!   past the token; for multi-line strings, templates and comments it is the
//!   only column that is meaningful on the line the token ends on.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
    pub offset: u32,
    pub from: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32, offset: u32, from: u32) -> Self {
        Self {
            line,
            character,
            offset,
            from,
        }
    }

    /// Position of the very first character of a source buffer.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1, 0, 1)
    }
}
