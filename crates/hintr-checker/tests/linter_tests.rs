//! The `Linter` entry point, as the CLI uses it.

use hintr_checker::{LintConfig, Linter};
use hintr_common::OptionValue;
use hintr_parser::{EventKind, RuleFault};

fn undef_config() -> LintConfig {
    LintConfig::new().with_option("undef", OptionValue::Bool(true))
}

#[test]
fn clean_unit() {
    let source = "'use strict';\n\nfunction add(a, b) {\n  return a + b;\n}\n\nadd(1, 2);\n";
    let report = Linter::new(undef_config()).lint("clean.js", source).expect("no faults");
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert!(!report.aborted);
    assert_eq!(report.lines_scanned, 8);
    assert!(report.summary.is_empty());
}

#[test]
fn configured_globals_are_known() {
    let source = "myLib.init();\n";
    let without = Linter::new(undef_config()).lint("a.js", source).expect("no faults");
    assert_eq!(without.codes(), ["W117"]);

    let with = Linter::new(undef_config().with_global("myLib", false))
        .lint("a.js", source)
        .expect("no faults");
    assert!(with.is_clean());
}

#[test]
fn environment_options_bring_their_globals() {
    let source = "document.title = 'x';\nrequire('fs');\n";
    let browser = Linter::new(undef_config().with_option("browser", OptionValue::Bool(true)))
        .lint("b.js", source)
        .expect("no faults");
    assert_eq!(browser.codes(), ["W117"]);
    assert_eq!(browser.diagnostics[0].message, "'require' is not defined.");

    let directive = "/*jshint node:true */\nrequire('fs');\nmodule.exports = 1;\n";
    let node = Linter::new(undef_config()).lint("n.js", directive).expect("no faults");
    assert!(node.is_clean(), "{:?}", node.diagnostics);
}

#[test]
fn max_errors_stops_the_unit() {
    let source = "a();\nb();\nc();\nd();\n";
    let config = undef_config().with_max_errors(2);
    let report = Linter::new(config).lint("m.js", source).expect("no faults");
    assert_eq!(report.codes().last(), Some(&"E043"));
    assert!(report.aborted);
}

#[test]
fn extra_listener_faults_become_errors() {
    let mut linter = Linter::default();
    linter.registry_mut().on(EventKind::Call, |_, _| Err(RuleFault::new("boom")));
    let fault = linter.lint("f.js", "f();\n").expect_err("listener fault");
    assert_eq!(fault.message, "boom");
    assert_eq!(fault.event, Some(EventKind::Call));
    assert!(fault.to_string().starts_with("internal fault: boom"));
}

#[test]
fn extra_listener_can_raise_diagnostics() {
    let mut linter = Linter::default();
    linter.registry_mut().on(EventKind::Call, |ctx, rules| {
        if ctx.name.as_deref() == Some("alert") {
            rules.warn("W087", ctx, &[]);
        }
        Ok(())
    });
    let report = linter.lint("x.js", "alert(1);\n").expect("no faults");
    assert_eq!(report.codes(), ["W087"]);
}

#[test]
fn one_linter_serves_many_threads() {
    let linter = Linter::new(undef_config());
    let sources = ["a();\n", "var b = 1;\n", "c(d);\n"];
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let linter = &linter;
                scope.spawn(move || {
                    linter
                        .lint("t.js", source)
                        .map(|report| report.diagnostics.len())
                        .unwrap_or(usize::MAX)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(usize::MAX))
            .collect()
    });
    assert_eq!(counts, [1, 0, 2]);
}
