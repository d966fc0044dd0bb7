use crate::config::{CONFIG_FILE_NAME, FileConfig, deep_merge, find_config, load_config, parse_config};
use hintr_common::OptionValue;
use serde_json::json;
use std::fs;

fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(object) => object,
        _ => panic!("expected an object"),
    }
}

#[test]
fn comments_are_ignored_outside_strings() {
    let source = r#"{
        // enforce strict equality
        "eqeqeq": true, /* and undef */ "undef": true,
        "predef": ["http://not-a-comment"]
    }"#;
    let parsed = parse_config(source).expect("parses");
    assert_eq!(parsed["eqeqeq"], json!(true));
    assert_eq!(parsed["undef"], json!(true));
    assert_eq!(parsed["predef"], json!(["http://not-a-comment"]));
}

#[test]
fn non_objects_are_rejected() {
    assert!(parse_config("[1, 2]").is_err());
    assert!(parse_config("{ nope").is_err());
}

#[test]
fn options_globals_and_predef() {
    let config = FileConfig::from_json(object(json!({
        "eqeqeq": true,
        "maxlen": 80,
        "quotmark": "single",
        "-W033": true,
        "globals": { "app": true, "jQuery": false },
        "predef": ["moment", "-jQuery"]
    })))
    .expect("valid config");

    assert_eq!(config.options.get("eqeqeq"), Some(&OptionValue::Bool(true)));
    assert_eq!(config.options.get("maxlen"), Some(&OptionValue::Number(80)));
    assert_eq!(
        config.options.get("quotmark"),
        Some(&OptionValue::String("single".into()))
    );
    assert!(config.options.contains_key("-W033"));
    assert_eq!(config.globals.get("app"), Some(&true));
    assert_eq!(config.globals.get("moment"), Some(&false));
    assert!(!config.globals.contains_key("jQuery"));
}

#[test]
fn invalid_options_are_errors() {
    let unknown = FileConfig::from_json(object(json!({ "nosuchoption": true })))
        .expect_err("unknown option");
    assert!(format!("{unknown:#}").contains("nosuchoption"));

    assert!(FileConfig::from_json(object(json!({ "quotmark": "backtick" }))).is_err());
    assert!(FileConfig::from_json(object(json!({ "maxlen": 1.5 }))).is_err());
    assert!(FileConfig::from_json(object(json!({ "curly": [true] }))).is_err());
    assert!(FileConfig::from_json(object(json!({ "globals": ["a"] }))).is_err());
    assert!(FileConfig::from_json(object(json!({ "globals": { "a": "yes" } }))).is_err());
    assert!(FileConfig::from_json(object(json!({ "predef": "a" }))).is_err());
}

#[test]
fn deep_merge_prefers_the_child() {
    let mut base = object(json!({
        "curly": true,
        "maxlen": 100,
        "globals": { "a": false, "b": false },
        "predef": ["x"]
    }));
    let child = object(json!({
        "maxlen": 80,
        "globals": { "b": true },
        "predef": ["-x", "y"]
    }));
    deep_merge(&mut base, child);
    assert_eq!(
        serde_json::Value::Object(base),
        json!({
            "curly": true,
            "maxlen": 80,
            "globals": { "a": false, "b": true },
            "predef": ["x", "-x", "y"]
        })
    );
}

#[test]
fn extends_chains_are_merged() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("base")).expect("mkdir");
    fs::write(
        dir.path().join("base/common.json"),
        r#"{ "curly": true, "maxlen": 100, "globals": { "shared": false } }"#,
    )
    .expect("write base");
    let child = dir.path().join("project.json");
    fs::write(
        &child,
        r#"{ "extends": "base/common.json", "maxlen": 80, "predef": ["-shared", "local"] }"#,
    )
    .expect("write child");

    let config = load_config(&child).expect("loads");
    assert_eq!(config.options.get("curly"), Some(&OptionValue::Bool(true)));
    assert_eq!(config.options.get("maxlen"), Some(&OptionValue::Number(80)));
    assert!(!config.options.contains_key("extends"));
    assert_eq!(config.globals.len(), 1);
    assert_eq!(config.globals.get("local"), Some(&false));
}

#[test]
fn extends_cycles_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a.json"), r#"{ "extends": "b.json" }"#).expect("write a");
    fs::write(dir.path().join("b.json"), r#"{ "extends": "a.json" }"#).expect("write b");

    let err = load_config(&dir.path().join("a.json")).expect_err("cycle");
    assert!(format!("{err:#}").contains("cycle"), "{err:#}");
}

#[test]
fn missing_base_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.json");
    fs::write(&path, r#"{ "extends": "missing.json" }"#).expect("write");
    assert!(load_config(&path).is_err());
}

#[test]
fn nearest_config_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("src/lib");
    fs::create_dir_all(&nested).expect("mkdir");
    fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").expect("write root config");

    let found = find_config(&nested).expect("found from nested dir");
    assert_eq!(found.file_name(), Some(std::ffi::OsStr::new(CONFIG_FILE_NAME)));
    assert_eq!(
        found.parent().map(|p| fs::canonicalize(p).expect("canonical")),
        Some(fs::canonicalize(dir.path()).expect("canonical"))
    );

    fs::write(dir.path().join("src").join(CONFIG_FILE_NAME), "{}").expect("write src config");
    let found = find_config(&nested).expect("found");
    assert!(found.parent().is_some_and(|p| p.ends_with("src")));
}

#[test]
fn lint_config_carries_globals() {
    let config = FileConfig::from_json(object(json!({ "undef": true, "globals": { "app": true } })))
        .expect("valid")
        .to_lint_config()
        .expect("lint config");
    assert!(config.options.is_enabled("undef"));
    assert_eq!(config.globals.get("app"), Some(true));
}
