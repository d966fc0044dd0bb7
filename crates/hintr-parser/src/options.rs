//! Layered option sets and the option catalog.
//!
//! An `OptionSet` is a persistent stack of layers. The bottom layer is the
//! base configuration handed to the engine; every directive comment derives a
//! new set with one more layer on top. Deriving never touches the layers
//! below, so restoring the set saved at block entry undoes every directive
//! seen inside the block.
//!
//! Per-code switches (`-W098` / `+W098`) are stored as ordinary entries under
//! the key `-W098`: `true` means disabled.

use hintr_common::OptionValue;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Value shape accepted by an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    /// A non-negative limit; `false` turns the limit off.
    Number,
    /// A boolean or one of the listed policy strings.
    Policy(&'static [&'static str]),
    /// Enables a bundled known-globals set.
    Environment,
}

#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub ty: OptionType,
    pub description: &'static str,
}

const fn spec(name: &'static str, ty: OptionType, description: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        ty,
        description,
    }
}

/// Every option the engine and the bundled rules understand.
pub static OPTION_CATALOG: &[OptionSpec] = &[
    // Enforcing options
    spec("bitwise", OptionType::Bool, "prohibit bitwise operators"),
    spec("curly", OptionType::Bool, "require braces around blocks in loops and conditionals"),
    spec("eqeqeq", OptionType::Bool, "require === and !=="),
    spec("forin", OptionType::Bool, "require for-in bodies to filter with an if statement"),
    spec("freeze", OptionType::Bool, "prohibit extending native prototypes"),
    spec("latedef", OptionType::Policy(&["nofunc"]), "prohibit use before definition"),
    spec("newcap", OptionType::Bool, "require capitalized constructor names"),
    spec("noarg", OptionType::Bool, "prohibit arguments.caller and arguments.callee"),
    spec("nonew", OptionType::Bool, "prohibit new for side effects"),
    spec("plusplus", OptionType::Bool, "prohibit ++ and --"),
    spec("quotmark", OptionType::Policy(&["single", "double"]), "enforce quote style"),
    spec("shadow", OptionType::Policy(&["inner", "outer"]), "variable shadowing policy"),
    spec("strict", OptionType::Policy(&["global"]), "require \"use strict\""),
    spec("undef", OptionType::Bool, "prohibit use of undeclared names"),
    spec("unused", OptionType::Policy(&["vars", "strict", "last-param"]), "warn on unused bindings"),
    spec("maxlen", OptionType::Number, "maximum line length"),
    spec("maxparams", OptionType::Number, "maximum parameters per function"),
    spec("maxstatements", OptionType::Number, "maximum statements per function"),
    spec("maxdepth", OptionType::Number, "maximum block nesting per function"),
    spec("maxcomplexity", OptionType::Number, "maximum cyclomatic complexity per function"),
    spec("maxerr", OptionType::Number, "stop after this many diagnostics"),
    // Relaxing options
    spec("asi", OptionType::Bool, "tolerate missing semicolons"),
    spec("boss", OptionType::Bool, "tolerate assignments in conditions"),
    spec("debug", OptionType::Bool, "tolerate debugger statements"),
    spec("eqnull", OptionType::Bool, "tolerate == null"),
    spec("evil", OptionType::Bool, "tolerate eval"),
    spec("expr", OptionType::Bool, "tolerate expression statements"),
    spec("lastsemic", OptionType::Bool, "tolerate a missing semicolon before } on one line"),
    spec("laxbreak", OptionType::Bool, "tolerate line breaks before operators"),
    spec("laxcomma", OptionType::Bool, "tolerate comma-first style"),
    spec("loopfunc", OptionType::Bool, "tolerate functions inside loops"),
    spec("multistr", OptionType::Bool, "tolerate multi-line strings"),
    spec("withstmt", OptionType::Bool, "tolerate with statements"),
    // Environments
    spec("browser", OptionType::Environment, "browser globals"),
    spec("devel", OptionType::Environment, "console and alert globals"),
    spec("mocha", OptionType::Environment, "mocha test globals"),
    spec("node", OptionType::Environment, "Node.js globals"),
    spec("worker", OptionType::Environment, "web worker globals"),
];

pub fn lookup_option(name: &str) -> Option<&'static OptionSpec> {
    OPTION_CATALOG.iter().find(|spec| spec.name == name)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionError {
    Unknown(String),
    BadValue { name: String, value: String },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::Unknown(name) => write!(f, "unknown option '{name}'"),
            OptionError::BadValue { name, value } => {
                write!(f, "bad value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// Parse a per-code switch such as `-W098` or `+W098`.
///
/// Returns the code and whether the switch disables it.
pub fn parse_code_switch(name: &str) -> Option<(&str, bool)> {
    let disable = match name.as_bytes().first() {
        Some(b'-') => true,
        Some(b'+') => false,
        _ => return None,
    };
    let code = &name[1..];
    let bytes = code.as_bytes();
    let well_formed = bytes.len() == 4 && bytes[0] == b'W' && bytes[1..].iter().all(u8::is_ascii_digit);
    well_formed.then_some((code, disable))
}

/// Check a name/value pair against the catalog.
pub fn validate_option(name: &str, value: &OptionValue) -> Result<(), OptionError> {
    if parse_code_switch(name).is_some() {
        return Ok(());
    }
    let Some(spec) = lookup_option(name) else {
        return Err(OptionError::Unknown(name.to_string()));
    };
    let ok = match (spec.ty, value) {
        (OptionType::Bool | OptionType::Environment, OptionValue::Bool(_)) => true,
        (OptionType::Number, OptionValue::Number(n)) => *n >= 0,
        (OptionType::Number, OptionValue::Bool(false)) => true,
        (OptionType::Policy(_), OptionValue::Bool(_)) => true,
        (OptionType::Policy(allowed), OptionValue::String(s)) => allowed.contains(&s.as_str()),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(OptionError::BadValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug)]
struct OptionLayer {
    values: FxHashMap<String, OptionValue>,
    parent: Option<Arc<OptionLayer>>,
}

/// Immutable, cheaply clonable view of the options in force at one point of
/// the source.
#[derive(Clone, Debug, Default)]
pub struct OptionSet {
    top: Option<Arc<OptionLayer>>,
}

impl OptionSet {
    pub fn new() -> Self {
        OptionSet::default()
    }

    /// A set with a single base layer.
    pub fn from_map(values: FxHashMap<String, OptionValue>) -> Self {
        OptionSet::new().derive(values)
    }

    /// Derive a child set whose entries shadow this one's.
    #[must_use]
    pub fn derive<I>(&self, overrides: I) -> OptionSet
    where
        I: IntoIterator<Item = (String, OptionValue)>,
    {
        let values: FxHashMap<String, OptionValue> = overrides.into_iter().collect();
        if values.is_empty() {
            return self.clone();
        }
        OptionSet {
            top: Some(Arc::new(OptionLayer {
                values,
                parent: self.top.clone(),
            })),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        let mut layer = self.top.as_deref();
        while let Some(current) = layer {
            if let Some(value) = current.values.get(name) {
                return Some(value);
            }
            layer = current.parent.as_deref();
        }
        None
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_enabled)
    }

    /// Numeric value of an enabled limit option.
    pub fn number(&self, name: &str) -> Option<i64> {
        self.get(name)
            .filter(|value| value.is_enabled())
            .and_then(OptionValue::as_number)
    }

    /// Policy string of an option such as `unused` or `shadow`.
    pub fn policy(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Whether `code` has been switched off by a `-W###` entry.
    pub fn is_code_disabled(&self, code: &str) -> bool {
        let key = format!("-{code}");
        self.get(&key).is_some_and(OptionValue::is_enabled)
    }

    /// Number of layers above the empty set.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut layer = self.top.as_deref();
        while let Some(current) = layer {
            depth += 1;
            layer = current.parent.as_deref();
        }
        depth
    }

    /// Collapse every layer into one map, upper layers winning.
    pub fn flatten(&self) -> FxHashMap<String, OptionValue> {
        let mut layers = Vec::new();
        let mut layer = self.top.as_deref();
        while let Some(current) = layer {
            layers.push(current);
            layer = current.parent.as_deref();
        }
        let mut flat = FxHashMap::default();
        for current in layers.into_iter().rev() {
            for (name, value) in &current.values {
                flat.insert(name.clone(), value.clone());
            }
        }
        flat
    }
}

impl FromIterator<(String, OptionValue)> for OptionSet {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        OptionSet::new().derive(iter)
    }
}
