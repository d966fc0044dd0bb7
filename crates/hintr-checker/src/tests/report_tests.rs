use crate::config::LintConfig;
use crate::linter::Linter;
use hintr_common::OptionValue;
use rustc_hash::FxHashMap;

#[test]
fn test_counts_by_severity() {
    let source = "var a = 1\nvar b = 1\n  , c = 2;\n";
    let report = Linter::default().lint("counts.js", source).expect("no faults");
    assert_eq!(report.codes(), ["W033", "W014", "I001"]);
    assert_eq!(report.warning_count(), 2);
    assert_eq!(report.info_count(), 1);
    assert_eq!(report.error_count(), 0);
    assert!(!report.is_clean());
    assert_eq!(report.file, "counts.js");
}

#[test]
fn test_fatal_report_is_aborted() {
    let report = Linter::default()
        .lint("broken.js", "var a = 'x;\nvar b = 2;\n")
        .expect("no faults");
    assert!(report.aborted);
    assert_eq!(report.codes(), ["E029"]);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.lines_scanned, 1);
}

#[test]
fn test_report_serializes_diagnostics_and_summary() {
    let config = LintConfig::new().with_option("undef", OptionValue::Bool(true));
    let report = Linter::new(config)
        .lint("serde.js", "missing();\n")
        .expect("no faults");
    let json = serde_json::to_value(&report).expect("serializable");
    assert_eq!(json["file"], "serde.js");
    assert_eq!(json["aborted"], false);
    assert_eq!(json["diagnostics"][0]["code"], "W117");
    assert_eq!(json["diagnostics"][0]["severity"], "warning");
    assert_eq!(json["diagnostics"][0]["line"], 1);
    assert_eq!(json["diagnostics"][0]["message"], "'missing' is not defined.");
    assert_eq!(json["diagnostics"][0]["evidence"], "missing();");
    assert_eq!(json["summary"]["implied_globals"][0]["name"], "missing");
    assert_eq!(json["summary"]["implied_globals"][0]["lines"][0], 1);
}

#[test]
fn test_config_from_options_validates_names_and_values() {
    let mut values = FxHashMap::default();
    values.insert("undef".to_string(), OptionValue::Bool(true));
    values.insert("maxlen".to_string(), OptionValue::Number(80));
    assert!(LintConfig::from_options(values).is_ok());

    let mut unknown = FxHashMap::default();
    unknown.insert("nosuch".to_string(), OptionValue::Bool(true));
    assert!(LintConfig::from_options(unknown).is_err());

    let mut bad = FxHashMap::default();
    bad.insert("unused".to_string(), OptionValue::String("sometimes".to_string()));
    assert!(LintConfig::from_options(bad).is_err());
}
