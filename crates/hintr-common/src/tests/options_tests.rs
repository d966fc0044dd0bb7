use crate::options::OptionValue;

#[test]
fn test_parse_directive_value() {
    assert_eq!(OptionValue::parse_directive_value("true"), OptionValue::Bool(true));
    assert_eq!(OptionValue::parse_directive_value(" false "), OptionValue::Bool(false));
    assert_eq!(OptionValue::parse_directive_value("80"), OptionValue::Number(80));
    assert_eq!(
        OptionValue::parse_directive_value("'single'"),
        OptionValue::String("single".to_string())
    );
    assert_eq!(
        OptionValue::parse_directive_value("vars"),
        OptionValue::String("vars".to_string())
    );
}

#[test]
fn test_truthiness() {
    assert!(OptionValue::from(true).is_enabled());
    assert!(!OptionValue::from(false).is_enabled());
    assert!(!OptionValue::from(0).is_enabled());
    assert!(OptionValue::from("vars").is_enabled());
    assert!(!OptionValue::from("false").is_enabled());
}

#[test]
fn test_deserialize_untagged() {
    let values: Vec<OptionValue> = serde_json::from_str(r#"[true, 12, "outer"]"#).unwrap();
    assert_eq!(
        values,
        vec![
            OptionValue::Bool(true),
            OptionValue::Number(12),
            OptionValue::String("outer".to_string())
        ]
    );
}
