use crate::fs::{FileFilter, discover_files, read_source};
use std::fs;
use std::path::{Path, PathBuf};

fn filter(exclude: &[&str]) -> FileFilter {
    let exclude: Vec<String> = exclude.iter().map(|p| p.to_string()).collect();
    FileFilter::new(vec!["js".into(), "mjs".into()], &exclude).expect("valid filter")
}

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(&path, "var a = 1;\n").expect("write");
    path
}

fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            file.strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn walks_directories_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(dir.path(), "b.js");
    touch(dir.path(), "a.mjs");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "lib/c.JS");
    touch(dir.path(), "lib/d.ts");

    let files = discover_files(&[dir.path().to_path_buf()], &filter(&[])).expect("walks");
    assert_eq!(names(dir.path(), &files), ["a.mjs", "b.js", "lib/c.JS"]);
}

#[test]
fn excludes_apply_to_directories_and_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(dir.path(), "app.js");
    touch(dir.path(), "app.min.js");
    touch(dir.path(), "vendor/jquery.js");
    touch(dir.path(), "src/vendor/lodash.js");

    let files = discover_files(&[dir.path().to_path_buf()], &filter(&["vendor", "*.min.js"]))
        .expect("walks");
    assert_eq!(names(dir.path(), &files), ["app.js"]);
}

#[test]
fn explicit_files_ignore_the_extension_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = touch(dir.path(), "bin/tool");
    let files = discover_files(&[script.clone(), script.clone()], &filter(&[])).expect("found");
    assert_eq!(files, [script]);
}

#[test]
fn missing_paths_are_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = discover_files(&[dir.path().join("nope")], &filter(&[])).expect_err("missing");
    assert!(err.to_string().contains("nope"));
}

#[test]
fn invalid_exclude_pattern() {
    assert!(FileFilter::new(vec!["js".into()], &["a[".to_string()]).is_err());
}

#[test]
fn binary_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let binary = dir.path().join("blob.js");
    fs::write(&binary, b"var a\0\x01\x02").expect("write");
    assert_eq!(read_source(&binary).expect("readable"), None);

    let text = touch(dir.path(), "ok.js");
    assert_eq!(
        read_source(&text).expect("readable").as_deref(),
        Some("var a = 1;\n")
    );
}
