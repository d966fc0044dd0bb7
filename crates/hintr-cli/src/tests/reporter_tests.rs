use crate::args::ReporterKind;
use crate::driver::{FileOutcome, FileResult, RunResult};
use crate::reporter::Reporter;
use hintr_checker::{LintConfig, Linter};
use hintr_common::OptionValue;
use std::path::PathBuf;

fn run_of(sources: &[(&str, &str)]) -> RunResult {
    let linter = Linter::new(LintConfig::new().with_option("undef", OptionValue::Bool(true)));
    let files = sources
        .iter()
        .map(|(name, source)| FileResult {
            path: PathBuf::from(name),
            outcome: FileOutcome::Linted(linter.lint(name, source).expect("no fault")),
        })
        .collect();
    RunResult { files }
}

fn first_position(run: &RunResult) -> (u32, u32) {
    let report = run.reports().next().expect("a report");
    let diagnostic = &report.diagnostics[0];
    (diagnostic.line, diagnostic.character)
}

#[test]
fn default_format() {
    let run = run_of(&[("a.js", "var x = 1\n")]);
    let (line, col) = first_position(&run);
    let out = Reporter::new(ReporterKind::Default, false).render(&run);
    assert_eq!(
        out,
        format!("a.js: line {line}, col {col}, Missing semicolon.\n\n1 problem (0 errors, 1 warning)\n")
    );
}

#[test]
fn verbose_appends_codes() {
    let run = run_of(&[("a.js", "var x = 1\n")]);
    let out = Reporter::new(ReporterKind::Default, false)
        .verbose(true)
        .render(&run);
    assert!(out.starts_with("a.js: line 1, col "));
    assert!(out.contains("Missing semicolon. (W033)\n"));
}

#[test]
fn unix_format_has_no_totals() {
    let run = run_of(&[("a.js", "var x = 1\n"), ("b.js", "y();\n")]);
    let out = Reporter::new(ReporterKind::Unix, false).verbose(true).render(&run);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("a.js:1:"));
    assert!(lines[0].ends_with(": Missing semicolon. (W033)"));
    assert!(lines[1].starts_with("b.js:1:"));
    assert!(lines[1].ends_with(": 'y' is not defined. (W117)"));
}

#[test]
fn clean_runs_print_nothing() {
    let run = run_of(&[("a.js", "var x = 1;\n")]);
    assert_eq!(Reporter::new(ReporterKind::Default, false).render(&run), "");
}

#[test]
fn totals_count_every_file() {
    let run = run_of(&[("a.js", "a();\nb();\n"), ("b.js", "var s = 'open\n")]);
    let out = Reporter::new(ReporterKind::Default, false).render(&run);
    assert!(out.ends_with("\n3 problems (1 error, 2 warnings)\n"), "{out}");
}

#[test]
fn summary_lists_globals_and_unused() {
    let run = run_of(&[("s.js", "var unused = 1;\nfoo();\nfoo();\n")]);
    let out = Reporter::new(ReporterKind::Unix, false)
        .show_summary(true)
        .render(&run);
    assert!(out.contains("s.js: implied global 'foo' (line 2, 3)\n"), "{out}");
    assert!(out.contains("s.js: unused var 'unused' (line 1, col "), "{out}");
}

#[test]
fn json_document() {
    let mut run = run_of(&[("a.js", "b();\n")]);
    run.files.push(FileResult {
        path: PathBuf::from("blob.js"),
        outcome: FileOutcome::Skipped,
    });
    run.files.push(FileResult {
        path: PathBuf::from("gone.js"),
        outcome: FileOutcome::Failed("failed to read gone.js".into()),
    });

    let out = Reporter::new(ReporterKind::Json, true).render(&run);
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
    assert_eq!(json["warnings"], 1);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["files"][0]["status"], "linted");
    assert_eq!(json["files"][0]["path"], "a.js");
    assert_eq!(json["files"][0]["report"]["diagnostics"][0]["code"], "W117");
    assert_eq!(json["files"][1]["status"], "skipped");
    assert_eq!(json["files"][2]["status"], "failed");
    assert_eq!(json["files"][2]["fault"], "failed to read gone.js");
}
