use crate::args::CliArgs;
use crate::driver::{FileOutcome, FileResult, RunResult, run};
use crate::{EXIT_CLEAN, EXIT_FAULT, EXIT_FINDINGS};
use clap::Parser;
use hintr_checker::Linter;
use std::fs;
use std::path::{Path, PathBuf};

fn args(extra: &[&str], paths: &[&Path]) -> CliArgs {
    let mut argv: Vec<String> = vec!["hintr".into()];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    argv.extend(paths.iter().map(|path| path.display().to_string()));
    CliArgs::try_parse_from(argv).expect("valid args")
}

fn codes(result: &RunResult, suffix: &str) -> Vec<&'static str> {
    result
        .files
        .iter()
        .find(|file| file.path.ends_with(suffix))
        .and_then(|file| match &file.outcome {
            FileOutcome::Linted(report) => Some(report.codes()),
            _ => None,
        })
        .expect("linted file")
}

#[test]
fn nearest_config_applies_per_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("strict")).expect("mkdir");
    fs::write(dir.path().join("top.js"), "foo();\n").expect("write");
    fs::write(dir.path().join("strict/inner.js"), "foo();\n").expect("write");
    fs::write(dir.path().join("strict/.hintrc"), r#"{ "undef": true }"#).expect("write");

    let result = run(&args(&[], &[dir.path()])).expect("runs");
    assert_eq!(result.files.len(), 2);
    assert!(codes(&result, "top.js").is_empty());
    assert_eq!(codes(&result, "inner.js"), ["W117"]);
    assert_eq!(result.exit_status(None), EXIT_FINDINGS);
}

#[test]
fn explicit_config_overrides_lookup() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(".hintrc"), r#"{ "undef": true }"#).expect("write");
    let other = dir.path().join("relaxed.json");
    fs::write(&other, r#"{ "asi": true }"#).expect("write");
    fs::write(dir.path().join("a.js"), "foo()\n").expect("write");

    let looked_up = run(&args(&[], &[dir.path()])).expect("runs");
    assert_eq!(codes(&looked_up, "a.js"), ["W033", "W117"]);

    let config = other.display().to_string();
    let explicit = run(&args(&["--config", &config], &[dir.path()])).expect("runs");
    assert!(codes(&explicit, "a.js").is_empty());
    assert_eq!(explicit.exit_status(None), EXIT_CLEAN);
}

#[test]
fn bad_config_fails_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(".hintrc"), r#"{ "maxlen": "long" }"#).expect("write");
    fs::write(dir.path().join("a.js"), "var a = 1;\n").expect("write");
    let err = run(&args(&[], &[dir.path()])).expect_err("invalid option value");
    assert!(format!("{err:#}").contains("maxlen"), "{err:#}");
}

#[test]
fn results_keep_discovery_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let names = ["a.js", "b.js", "c.js", "d.js", "e.js", "f.js"];
    for name in names {
        fs::write(dir.path().join(name), "x = 1\n").expect("write");
    }
    fs::write(dir.path().join("g.js"), b"\0\0binary").expect("write");

    let result = run(&args(&[], &[dir.path()])).expect("runs");
    let order: Vec<PathBuf> = result.files.iter().map(|file| file.path.clone()).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(result.reports().count(), names.len());
    assert_eq!(result.skipped().count(), 1);
    assert_eq!(result.warning_count(), names.len());
}

fn linted(source: &str) -> FileResult {
    let report = Linter::default().lint("t.js", source).expect("no fault");
    FileResult {
        path: PathBuf::from("t.js"),
        outcome: FileOutcome::Linted(report),
    }
}

#[test]
fn exit_status_rules() {
    let clean = RunResult {
        files: vec![linted("var a = 1;\n")],
    };
    assert_eq!(clean.exit_status(None), EXIT_CLEAN);

    let warnings = RunResult {
        files: vec![linted("a = 1\nb = 2\n")],
    };
    assert_eq!(warnings.warning_count(), 2);
    assert_eq!(warnings.exit_status(None), EXIT_FINDINGS);
    assert_eq!(warnings.exit_status(Some(2)), EXIT_CLEAN);
    assert_eq!(warnings.exit_status(Some(1)), EXIT_FINDINGS);

    let errors = RunResult {
        files: vec![linted("var s = 'open\n")],
    };
    assert!(errors.error_count() > 0);
    assert_eq!(errors.exit_status(Some(100)), EXIT_FINDINGS);

    let faulted = RunResult {
        files: vec![
            linted("var a = 1;\n"),
            FileResult {
                path: PathBuf::from("gone.js"),
                outcome: FileOutcome::Failed("failed to read gone.js".into()),
            },
        ],
    };
    assert_eq!(faulted.exit_status(None), EXIT_FAULT);
    assert_eq!(faulted.failures().count(), 1);
}
