use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Bytes inspected when deciding whether a file is binary.
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Decides which files under the requested paths get linted.
#[derive(Debug)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude: GlobSet,
}

impl FileFilter {
    pub fn new(extensions: Vec<String>, exclude: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid --exclude pattern '{pattern}'"))?;
            builder.add(glob);
        }
        Ok(FileFilter {
            extensions,
            exclude: builder.build().context("failed to compile --exclude patterns")?,
        })
    }

    /// `path` matches an exclude pattern, either as a whole, relative to
    /// the walked `root`, or by its file name.
    pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        self.exclude.is_match(path)
            || path
                .strip_prefix(root)
                .is_ok_and(|relative| self.exclude.is_match(relative))
            || path
                .file_name()
                .is_some_and(|name| self.exclude.is_match(Path::new(name)))
    }

    pub fn has_lint_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

/// Expand `paths` into the sorted, de-duplicated list of files to lint.
///
/// Files named explicitly are linted whatever their extension; directories
/// are walked for files with a lint extension. Excludes apply to both.
pub fn discover_files(paths: &[PathBuf], filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        let metadata = match std::fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(err) => bail!("cannot read {}: {err}", root.display()),
        };
        if metadata.is_file() {
            if !filter.is_excluded(root, root) {
                files.push(root.clone());
            }
            continue;
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !filter.is_excluded(entry.path(), root));
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if entry.file_type().is_file() && filter.has_lint_extension(entry.path()) {
                trace!(file = %entry.path().display(), "discovered");
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "files discovered");
    Ok(files)
}

/// Read a source file. `None` means the file looks binary and is skipped.
pub fn read_source(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if memchr::memchr(0, head).is_some() {
        debug!(file = %path.display(), "skipping binary file");
        return Ok(None);
    }
    Ok(Some(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }))
}
