use crate::options::{
    OptionError, OptionSet, lookup_option, parse_code_switch, validate_option,
};
use hintr_common::OptionValue;

fn set(entries: &[(&str, OptionValue)]) -> OptionSet {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_derived_layer_shadows_without_touching_parent() {
    let base = set(&[("eqeqeq", OptionValue::Bool(true)), ("curly", OptionValue::Bool(true))]);
    let child = base.derive([("eqeqeq".to_string(), OptionValue::Bool(false))]);

    assert!(!child.is_enabled("eqeqeq"));
    assert!(child.is_enabled("curly"));
    assert!(base.is_enabled("eqeqeq"));
    assert_eq!(base.depth(), 1);
    assert_eq!(child.depth(), 2);
}

#[test]
fn test_empty_derive_reuses_layer() {
    let base = set(&[("undef", OptionValue::Bool(true))]);
    let same = base.derive(Vec::new());
    assert_eq!(same.depth(), base.depth());
}

#[test]
fn test_number_and_policy_accessors() {
    let options = set(&[
        ("maxlen", OptionValue::Number(80)),
        ("maxdepth", OptionValue::Bool(false)),
        ("unused", OptionValue::String("vars".to_string())),
    ]);
    assert_eq!(options.number("maxlen"), Some(80));
    assert_eq!(options.number("maxdepth"), None);
    assert_eq!(options.number("maxparams"), None);
    assert_eq!(options.policy("unused"), Some("vars"));
    assert!(options.is_enabled("unused"));
}

#[test]
fn test_code_switches() {
    assert_eq!(parse_code_switch("-W098"), Some(("W098", true)));
    assert_eq!(parse_code_switch("+W098"), Some(("W098", false)));
    assert_eq!(parse_code_switch("-E011"), None);
    assert_eq!(parse_code_switch("-W98"), None);
    assert_eq!(parse_code_switch("W098"), None);

    let options = set(&[("-W098", OptionValue::Bool(true))]);
    assert!(options.is_code_disabled("W098"));
    assert!(!options.is_code_disabled("W117"));

    let restored = options.derive([("-W098".to_string(), OptionValue::Bool(false))]);
    assert!(!restored.is_code_disabled("W098"));
}

#[test]
fn test_validate_option() {
    assert_eq!(validate_option("eqeqeq", &OptionValue::Bool(true)), Ok(()));
    assert_eq!(validate_option("maxlen", &OptionValue::Number(100)), Ok(()));
    assert_eq!(validate_option("maxlen", &OptionValue::Bool(false)), Ok(()));
    assert_eq!(
        validate_option("quotmark", &OptionValue::String("single".to_string())),
        Ok(())
    );
    assert_eq!(validate_option("-W117", &OptionValue::Bool(true)), Ok(()));

    assert_eq!(
        validate_option("nosuch", &OptionValue::Bool(true)),
        Err(OptionError::Unknown("nosuch".to_string()))
    );
    assert!(matches!(
        validate_option("maxlen", &OptionValue::Number(-1)),
        Err(OptionError::BadValue { .. })
    ));
    assert!(matches!(
        validate_option("quotmark", &OptionValue::String("backtick".to_string())),
        Err(OptionError::BadValue { .. })
    ));
    assert!(matches!(
        validate_option("eqeqeq", &OptionValue::Number(3)),
        Err(OptionError::BadValue { .. })
    ));
}

#[test]
fn test_flatten_prefers_upper_layers() {
    let base = set(&[("maxlen", OptionValue::Number(80)), ("undef", OptionValue::Bool(true))]);
    let child = base.derive([("maxlen".to_string(), OptionValue::Number(120))]);
    let flat = child.flatten();
    assert_eq!(flat.get("maxlen"), Some(&OptionValue::Number(120)));
    assert_eq!(flat.get("undef"), Some(&OptionValue::Bool(true)));
    assert_eq!(flat.len(), 2);
}

#[test]
fn test_catalog_lookup() {
    assert!(lookup_option("latedef").is_some());
    assert!(lookup_option("node").is_some());
    assert!(lookup_option("unknown-option").is_none());
}
