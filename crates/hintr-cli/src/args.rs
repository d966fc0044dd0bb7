use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the hintr binary.
#[derive(Parser, Debug)]
#[command(name = "hintr", version, about = "A configurable JavaScript linter")]
pub struct CliArgs {
    /// Files or directories to lint.
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Use this config file instead of looking up `.hintrc` per file.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReporterKind::Default)]
    pub reporter: ReporterKind,

    /// Skip files and directories matching this glob (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Extensions linted when walking directories.
    #[arg(long, value_delimiter = ',', default_values = ["js", "mjs", "cjs"])]
    pub ext: Vec<String>,

    /// Print implied globals and unused bindings per file.
    #[arg(long = "show-summary")]
    pub show_summary: bool,

    /// Append diagnostic codes to messages.
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Exit cleanly when there are no errors and at most this many other
    /// diagnostics.
    #[arg(long = "max-warnings", value_name = "N")]
    pub max_warnings: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReporterKind {
    /// `file: line L, col C, message`
    #[default]
    Default,
    /// `file:line:col: message`
    Unix,
    /// One JSON document for the whole run.
    Json,
}

impl CliArgs {
    /// Extensions without a leading dot, lowercased.
    pub fn extensions(&self) -> Vec<String> {
        self.ext
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}
