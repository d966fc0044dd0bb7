//! Batch linting: discover files, pick each file's config, lint in
//! parallel.

use anyhow::Result;
use hintr_checker::{LintConfig, LintReport, Linter};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, warn};

use crate::args::CliArgs;
use crate::config::{find_config, load_config};
use crate::fs::{FileFilter, discover_files, read_source};
use crate::{EXIT_CLEAN, EXIT_FAULT, EXIT_FINDINGS};

#[derive(Debug)]
pub enum FileOutcome {
    Linted(LintReport),
    /// The file looked binary.
    Skipped,
    /// Reading the file failed or a rule faulted.
    Failed(String),
}

#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Every file of a run, in discovery order.
#[derive(Debug, Default)]
pub struct RunResult {
    pub files: Vec<FileResult>,
}

impl RunResult {
    pub fn reports(&self) -> impl Iterator<Item = &LintReport> {
        self.files.iter().filter_map(|file| match &file.outcome {
            FileOutcome::Linted(report) => Some(report),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().filter_map(|file| match &file.outcome {
            FileOutcome::Failed(message) => Some((file.path.as_path(), message.as_str())),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|file| matches!(file.outcome, FileOutcome::Skipped))
            .map(|file| file.path.as_path())
    }

    pub fn error_count(&self) -> usize {
        self.reports().map(LintReport::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.reports().map(LintReport::warning_count).sum()
    }

    pub fn info_count(&self) -> usize {
        self.reports().map(LintReport::info_count).sum()
    }

    /// Process exit status for this run.
    ///
    /// Without `max_warnings` any diagnostic is a finding. With it, only
    /// errors or more than `max_warnings` warnings and infos are.
    pub fn exit_status(&self, max_warnings: Option<usize>) -> u8 {
        if self.failures().next().is_some() {
            return EXIT_FAULT;
        }
        let others = self.warning_count() + self.info_count();
        let findings = match max_warnings {
            Some(max) => self.error_count() > 0 || others > max,
            None => self.error_count() + others > 0,
        };
        if findings { EXIT_FINDINGS } else { EXIT_CLEAN }
    }
}

/// Lint everything `args` names.
///
/// Configuration and discovery problems are errors; per-file read
/// failures and rule faults are recorded in the result.
pub fn run(args: &CliArgs) -> Result<RunResult> {
    let filter = FileFilter::new(args.extensions(), &args.exclude)?;
    let files = discover_files(&args.paths, &filter)?;
    let (linters, jobs) = assign_linters(files, args.config.as_deref())?;
    debug!(files = jobs.len(), configs = linters.len(), "linting");

    let files = jobs
        .into_par_iter()
        .map(|(path, index)| {
            let outcome = lint_file(&path, &linters[index]);
            FileResult { path, outcome }
        })
        .collect();
    Ok(RunResult { files })
}

/// Pair every file with the linter for its config, loading each distinct
/// config once.
fn assign_linters(
    files: Vec<PathBuf>,
    explicit: Option<&Path>,
) -> Result<(Vec<Linter>, Vec<(PathBuf, usize)>)> {
    let mut linters = Vec::new();
    let mut by_config: FxHashMap<Option<PathBuf>, usize> = FxHashMap::default();
    let mut nearest: FxHashMap<PathBuf, Option<PathBuf>> = FxHashMap::default();
    let mut jobs = Vec::with_capacity(files.len());

    for path in files {
        let config_path = match explicit {
            Some(config) => Some(config.to_path_buf()),
            None => {
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                nearest
                    .entry(dir)
                    .or_insert_with_key(|dir| find_config(dir))
                    .clone()
            }
        };
        let index = match by_config.get(&config_path) {
            Some(&index) => index,
            None => {
                let config = match &config_path {
                    Some(config_path) => load_config(config_path)?.to_lint_config()?,
                    None => LintConfig::default(),
                };
                linters.push(Linter::new(config));
                by_config.insert(config_path, linters.len() - 1);
                linters.len() - 1
            }
        };
        jobs.push((path, index));
    }
    Ok((linters, jobs))
}

fn lint_file(path: &Path, linter: &Linter) -> FileOutcome {
    let name = path.display().to_string();
    let _span = span!(Level::DEBUG, "lint_file", file = %name).entered();
    let source = match read_source(path) {
        Ok(Some(source)) => source,
        Ok(None) => return FileOutcome::Skipped,
        Err(err) => return FileOutcome::Failed(format!("{err:#}")),
    };
    match linter.lint(&name, &source) {
        Ok(report) => FileOutcome::Linted(report),
        Err(fault) => {
            warn!(file = %name, %fault, "lint failed");
            FileOutcome::Failed(fault.to_string())
        }
    }
}
