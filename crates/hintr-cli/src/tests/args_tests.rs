use crate::args::{CliArgs, ReporterKind};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn defaults() {
    let args = CliArgs::try_parse_from(["hintr", "src"]).expect("valid args");
    assert_eq!(args.paths, [PathBuf::from("src")]);
    assert_eq!(args.reporter, ReporterKind::Default);
    assert_eq!(args.extensions(), ["js", "mjs", "cjs"]);
    assert!(args.config.is_none());
    assert!(args.exclude.is_empty());
    assert!(!args.verbose && !args.show_summary && !args.no_color);
    assert_eq!(args.max_warnings, None);
}

#[test]
fn all_flags() {
    let args = CliArgs::try_parse_from([
        "hintr",
        "--config",
        "lint.json",
        "--reporter",
        "unix",
        "--exclude",
        "vendor/**",
        "--exclude",
        "*.min.js",
        "--ext",
        ".JS,jsx",
        "--show-summary",
        "--verbose",
        "--no-color",
        "--max-warnings",
        "3",
        "a.js",
        "lib",
    ])
    .expect("valid args");
    assert_eq!(args.config, Some(PathBuf::from("lint.json")));
    assert_eq!(args.reporter, ReporterKind::Unix);
    assert_eq!(args.exclude, ["vendor/**", "*.min.js"]);
    assert_eq!(args.extensions(), ["js", "jsx"]);
    assert!(args.verbose && args.show_summary && args.no_color);
    assert_eq!(args.max_warnings, Some(3));
    assert_eq!(args.paths, [PathBuf::from("a.js"), PathBuf::from("lib")]);
}

#[test]
fn paths_are_required() {
    assert!(CliArgs::try_parse_from(["hintr"]).is_err());
}

#[test]
fn unknown_reporter_is_rejected() {
    assert!(CliArgs::try_parse_from(["hintr", "--reporter", "xml", "a.js"]).is_err());
}
