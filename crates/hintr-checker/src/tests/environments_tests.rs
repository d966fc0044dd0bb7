use crate::environments::{BROWSER, BundledEnvironments, ECMASCRIPT, NODE, standard_globals};
use hintr_parser::EnvironmentProvider;
use rustc_hash::FxHashSet;

#[test]
fn test_bundled_environment_names() {
    let provider = BundledEnvironments;
    for name in ["browser", "devel", "mocha", "node", "worker"] {
        assert!(provider.environment(name).is_some(), "{name}");
    }
    assert!(provider.environment("ecmascript").is_none());
    assert!(provider.environment("jquery").is_none());
}

#[test]
fn test_standard_globals_are_read_only_builtins() {
    let globals = standard_globals();
    assert_eq!(globals.len(), ECMASCRIPT.len());
    assert_eq!(globals.get("Array"), Some(false));
    assert_eq!(globals.get("undefined"), Some(false));
    assert!(!globals.contains("window"));
}

#[test]
fn test_writable_environment_names() {
    let writable = |table: &[(&str, bool)], name: &str| {
        table.iter().find(|(n, _)| *n == name).map(|(_, w)| *w)
    };
    assert_eq!(writable(NODE, "exports"), Some(true));
    assert_eq!(writable(NODE, "require"), Some(false));
    assert_eq!(writable(BROWSER, "location"), Some(true));
    assert_eq!(writable(BROWSER, "document"), Some(false));
}

#[test]
fn test_tables_have_no_duplicates() {
    let provider = BundledEnvironments;
    for name in ["browser", "devel", "mocha", "node", "worker"] {
        let table = provider.environment(name).unwrap_or_default();
        let unique: FxHashSet<&str> = table.iter().map(|(n, _)| *n).collect();
        assert_eq!(unique.len(), table.len(), "{name}");
    }
    let unique: FxHashSet<&str> = ECMASCRIPT.iter().map(|(n, _)| *n).collect();
    assert_eq!(unique.len(), ECMASCRIPT.len());
}
