//! End-to-end runs of the `hintr` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn hintr(args: &[&str], paths: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hintr"))
        .args(args)
        .args(paths)
        .env_remove("HINTR_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("hintr runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn clean_project_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("ok.js"), "'use strict';\nvar a = 1;\na += 1;\n").expect("write");

    let output = hintr(&[], &[dir.path()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn findings_exit_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("bad.js");
    fs::write(&file, "debugger\n").expect("write");

    let output = hintr(&["--reporter", "unix", "--verbose"], &[&file]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Forgotten 'debugger' statement? (W087)"), "{out}");
    assert!(out.contains("Missing semicolon. (W033)"), "{out}");
}

#[test]
fn max_warnings_tolerates_warnings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("w.js");
    fs::write(&file, "x = 1\n").expect("write");

    assert_eq!(hintr(&["--max-warnings", "1"], &[&file]).status.code(), Some(0));
    assert_eq!(hintr(&["--max-warnings", "0"], &[&file]).status.code(), Some(1));
}

#[test]
fn config_errors_exit_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("broken.json");
    fs::write(&config, "{ \"nosuchoption\": true }").expect("write");
    fs::write(dir.path().join("a.js"), "var a = 1;\n").expect("write");

    let config = config.display().to_string();
    let output = hintr(&["--config", &config], &[dir.path()]);
    assert_eq!(output.status.code(), Some(2));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("nosuchoption"), "{err}");
}

#[test]
fn missing_path_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = hintr(&[], &[&dir.path().join("missing.js")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn json_reporter_with_directory_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(".hintrc"),
        "// project settings\n{ \"undef\": true, \"globals\": { \"app\": false } }\n",
    )
    .expect("write");
    fs::write(dir.path().join("main.js"), "app.start();\nother();\n").expect("write");
    fs::write(dir.path().join("skip.txt"), "not javascript").expect("write");

    let output = hintr(&["--reporter", "json"], &[dir.path()]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    let files = json["files"].as_array().expect("files array");
    assert_eq!(files.len(), 1);
    let diagnostics = files[0]["report"]["diagnostics"].as_array().expect("diagnostics");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], "'other' is not defined.");
    assert_eq!(diagnostics[0]["line"], 2);
}
