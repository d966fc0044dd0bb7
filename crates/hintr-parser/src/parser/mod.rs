//! Parser / linting driver.
//!
//! A recursive-descent statement parser with a precedence-climbing
//! expression parser. No syntax tree is built: each production reports what
//! it recognized through the event fabric and returns, for expressions, a
//! small `ExprInfo` summary that enclosing productions inspect.
//!
//! Module layout:
//! - `state` - `ParserState`, token handling, directives, events, frames
//! - `state_statements` - statements, declarations, modules
//! - `state_expressions` - expressions and look-ahead
//! - `state_functions` - functions, arrows, classes, binding patterns
//! - `precedence` - binary operator binding powers

mod precedence;
mod state;
mod state_expressions;
mod state_functions;
mod state_statements;

pub use state::{ParseOutcome, ParserConfig, ParserState};

use crate::events::{ExprKind, FunctionMetrics};
use crate::fault::InternalFault;
use hintr_common::Position;

/// Why parsing of a unit stopped early.
#[derive(Debug)]
pub(crate) enum Abort {
    /// A fatal diagnostic has been recorded.
    Fatal,
    Fault(InternalFault),
}

pub(crate) type ParseResult<T> = Result<T, Abort>;

/// What enclosing productions need to know about a parsed expression.
#[derive(Clone, Debug)]
pub(crate) struct ExprInfo {
    pub kind: ExprKind,
    pub pos: Position,
    pub parenthesized: bool,
    /// Source spelling of a literal operand (`null`, `0`, `''`, `undefined`...).
    pub literal: Option<String>,
    /// Dotted path of an identifier or member chain with static names.
    pub path: Option<String>,
    /// Name of a bare identifier, or the last segment of a member chain.
    pub name: Option<String>,
    pub is_string: bool,
    /// For array and object literals, the bare identifiers that would be
    /// written if the literal is a destructuring target.
    pub targets: Vec<(String, Position)>,
}

impl ExprInfo {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        ExprInfo {
            kind,
            pos,
            parenthesized: false,
            literal: None,
            path: None,
            name: None,
            is_string: false,
            targets: Vec::new(),
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == ExprKind::Identifier && !self.parenthesized
    }

    /// An unparenthesized array or object literal.
    pub fn is_pattern(&self) -> bool {
        matches!(self.kind, ExprKind::Array | ExprKind::Object) && !self.parenthesized
    }

    /// Move the names this element writes, as part of a pattern, into `into`.
    pub fn collect_targets(self, into: &mut Vec<(String, Position)>) {
        if self.is_pattern() {
            into.extend(self.targets);
        } else if self.kind == ExprKind::Identifier {
            into.extend(self.name.map(|name| (name, self.pos)));
        }
    }
}

/// Whether a statement completed normally or always transfers control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Normal,
    Jump(&'static str),
}

impl Flow {
    pub fn is_jump(self) -> bool {
        matches!(self, Flow::Jump(_))
    }
}

/// Per-function parsing state. The program itself has one too.
#[derive(Clone, Debug, Default)]
pub(crate) struct FunctionContext {
    pub metrics: FunctionMetrics,
    pub block_depth: u32,
    pub loop_depth: u32,
    pub is_async: bool,
    pub is_generator: bool,
}

impl FunctionContext {
    pub fn new(is_async: bool, is_generator: bool) -> Self {
        FunctionContext {
            metrics: FunctionMetrics {
                complexity: 1,
                ..FunctionMetrics::default()
            },
            is_async,
            is_generator,
            ..FunctionContext::default()
        }
    }
}
