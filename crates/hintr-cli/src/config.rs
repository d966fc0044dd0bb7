//! Config files.
//!
//! A config file is a JSON object (comments allowed) whose keys are catalog
//! options plus three special ones:
//!
//! - `globals`: `{ "name": writable }`
//! - `predef`: `["name", "-name"]`, where a leading `-` drops the global
//! - `extends`: path of a base config, relative to the file naming it
//!
//! `extends` chains are deep merged: objects merge key by key, arrays are
//! concatenated base first, anything else is replaced by the child.

use anyhow::{Context, Result, anyhow, bail};
use hintr_checker::LintConfig;
use hintr_common::OptionValue;
use hintr_parser::validate_option;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".hintrc";

/// A fully resolved config file: its `extends` chain merged and every
/// option checked against the catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileConfig {
    pub options: FxHashMap<String, OptionValue>,
    /// Known globals added by the config (`name -> writable`).
    pub globals: FxHashMap<String, bool>,
}

impl FileConfig {
    /// Interpret a merged config object.
    pub fn from_json(mut object: Map<String, Value>) -> Result<Self> {
        let mut config = FileConfig::default();

        if let Some(globals) = object.remove("globals") {
            let Value::Object(globals) = globals else {
                bail!("'globals' must be an object");
            };
            for (name, writable) in globals {
                let Value::Bool(writable) = writable else {
                    bail!("global '{name}' must be true or false");
                };
                config.globals.insert(name, writable);
            }
        }

        if let Some(predef) = object.remove("predef") {
            let Value::Array(names) = predef else {
                bail!("'predef' must be an array of names");
            };
            for name in names {
                let Value::String(name) = name else {
                    bail!("'predef' entries must be strings");
                };
                match name.strip_prefix('-') {
                    Some(removed) => {
                        config.globals.remove(removed);
                    }
                    None => {
                        config.globals.insert(name, false);
                    }
                }
            }
        }

        object.remove("extends");
        for (name, value) in object {
            let value = option_value(&name, &value)?;
            validate_option(&name, &value)?;
            config.options.insert(name, value);
        }
        Ok(config)
    }

    pub fn to_lint_config(&self) -> Result<LintConfig> {
        let config = LintConfig::from_options(self.options.clone())?;
        Ok(self
            .globals
            .iter()
            .fold(config, |config, (name, writable)| config.with_global(name, *writable)))
    }
}

fn option_value(name: &str, value: &Value) -> Result<OptionValue> {
    match value {
        Value::Bool(flag) => Ok(OptionValue::Bool(*flag)),
        Value::Number(number) => number
            .as_i64()
            .map(OptionValue::Number)
            .ok_or_else(|| anyhow!("option '{name}' must be an integer")),
        Value::String(text) => Ok(OptionValue::String(text.clone())),
        _ => bail!("option '{name}' must be a boolean, an integer or a string"),
    }
}

/// Parse config text into a JSON object. `//` and `/* */` comments are
/// allowed outside strings.
pub fn parse_config(source: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(&strip_comments(source)).context("invalid config JSON")?;
    match value {
        Value::Object(object) => Ok(object),
        _ => bail!("config must be a JSON object"),
    }
}

/// Load `path` and everything it extends.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let mut visited = FxHashSet::default();
    let merged = load_merged(path, &mut visited)?;
    FileConfig::from_json(merged).with_context(|| format!("in config {}", path.display()))
}

fn load_merged(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<Map<String, Value>> {
    let canonical = std::fs::canonicalize(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    if !visited.insert(canonical.clone()) {
        bail!("config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(&canonical)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut object =
        parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))?;
    debug!(config = %canonical.display(), "loaded config");

    let merged = match object.remove("extends") {
        None => object,
        Some(Value::String(base)) => {
            let base_path = canonical
                .parent()
                .map_or_else(|| PathBuf::from(&base), |dir| dir.join(&base));
            let mut merged = load_merged(&base_path, visited)?;
            deep_merge(&mut merged, object);
            merged
        }
        Some(_) => bail!("'extends' in {} must be a path", path.display()),
    };

    visited.remove(&canonical);
    Ok(merged)
}

/// Merge `child` into `base`, the child winning on conflicts.
pub fn deep_merge(base: &mut Map<String, Value>, child: Map<String, Value>) {
    for (key, value) in child {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(inner)), Value::Object(child_inner)) => {
                deep_merge(inner, child_inner);
            }
            (Some(Value::Array(items)), Value::Array(child_items)) => {
                items.extend(child_items);
            }
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// The nearest `.hintrc` in `dir` or one of its ancestors.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let start = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    start
        .ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

fn strip_comments(source: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Code,
        Str { escaped: bool },
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Code;
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        match mode {
            Mode::Code => match (ch, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    mode = Mode::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    mode = Mode::BlockComment;
                }
                _ => {
                    if ch == '"' {
                        mode = Mode::Str { escaped: false };
                    }
                    out.push(ch);
                }
            },
            Mode::Str { escaped } => {
                out.push(ch);
                mode = match ch {
                    _ if escaped => Mode::Str { escaped: false },
                    '\\' => Mode::Str { escaped: true },
                    '"' => Mode::Code,
                    _ => mode,
                };
            }
            Mode::LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    mode = Mode::Code;
                }
            }
            Mode::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push(' ');
                    mode = Mode::Code;
                } else if ch == '\n' {
                    out.push(ch);
                }
            }
        }
    }
    out
}
