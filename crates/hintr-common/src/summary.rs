//! Summary records produced once per linted unit from scope teardown.

use serde::Serialize;
use std::fmt;

/// How a binding was introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Param,
    Catch,
    Import,
}

impl BindingKind {
    /// `let`, `const` and `class` bindings may not be redeclared in the same frame.
    pub fn is_lexical(self) -> bool {
        matches!(self, BindingKind::Let | BindingKind::Const | BindingKind::Class)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
            BindingKind::Function => "function",
            BindingKind::Class => "class",
            BindingKind::Param => "param",
            BindingKind::Catch => "catch",
            BindingKind::Import => "import",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that was read or written but never declared in any visible scope
/// and is not a known global.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImpliedGlobal {
    pub name: String,
    /// Every line the name was referenced on, in source order.
    pub lines: Vec<u32>,
}

/// A declared name that was never read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnusedBinding {
    pub name: String,
    pub kind: BindingKind,
    pub line: u32,
    pub character: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LintSummary {
    pub implied_globals: Vec<ImpliedGlobal>,
    pub unused: Vec<UnusedBinding>,
}

impl LintSummary {
    pub fn is_empty(&self) -> bool {
        self.implied_globals.is_empty() && self.unused.is_empty()
    }
}
