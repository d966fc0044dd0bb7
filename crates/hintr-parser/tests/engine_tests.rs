//! End-to-end checks of the engine through its public API.

use hintr_common::OptionValue;
use hintr_parser::{
    EnvironmentProvider, EventKind, EventRegistry, OptionSet, ParserConfig, parse_source,
};

struct TestEnvironments;

const NODE: &[(&str, bool)] = &[("require", false), ("module", true)];

impl EnvironmentProvider for TestEnvironments {
    fn environment(&self, name: &str) -> Option<&'static [(&'static str, bool)]> {
        match name {
            "node" => Some(NODE),
            _ => None,
        }
    }
}

fn implied_names(source: &str, config: ParserConfig<'_>) -> Vec<String> {
    let registry = EventRegistry::new();
    let outcome = parse_source(source, &registry, config).expect("no faults");
    outcome
        .summary
        .implied_globals
        .into_iter()
        .map(|global| global.name)
        .collect()
}

#[test]
fn environment_enabled_by_directive() {
    let config = ParserConfig {
        environments: Some(&TestEnvironments),
        ..ParserConfig::default()
    };
    let source = "/*jshint node:true */\nvar fs = require('fs');\nfs.x = process;\n";
    assert_eq!(implied_names(source, config), ["process"]);
}

#[test]
fn environment_enabled_by_base_options() {
    let options: OptionSet = [("node".to_string(), OptionValue::Bool(true))]
        .into_iter()
        .collect();
    let config = ParserConfig {
        options,
        environments: Some(&TestEnvironments),
        ..ParserConfig::default()
    };
    assert!(implied_names("module.exports = require('x');\n", config).is_empty());
}

#[test]
fn global_directive_can_remove_a_name() {
    let mut config = ParserConfig::default();
    config.globals.insert("jQuery", false);
    let source = "/*global -jQuery */\njQuery();\n";
    assert_eq!(implied_names(source, config), ["jQuery"]);
}

#[test]
fn ignore_region_drops_warnings_but_keeps_errors() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::ExpressionStatement, |ctx, rules| {
        rules.warn("W030", ctx, &[]);
        Ok(())
    });
    let source = "a;\n/*jshint ignore:start */\nb;\nconst c;\n/*jshint ignore:end */\nd;\n";
    let outcome = parse_source(source, &registry, ParserConfig::default()).expect("no faults");
    let found: Vec<(&str, u32)> = outcome
        .diagnostics
        .iter()
        .map(|d| (d.code, d.line))
        .collect();
    assert_eq!(found, [("W030", 1), ("E012", 4), ("W030", 6)]);
}

#[test]
fn constant_reassignment_and_strict_with() {
    let registry = EventRegistry::new();
    let source = "const limit = 1;\nlimit = 2;\n";
    let outcome = parse_source(source, &registry, ParserConfig::default()).expect("no faults");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].code, "E013");
    assert_eq!(
        outcome.diagnostics[0].message,
        "Attempting to override 'limit' which is a constant."
    );

    let source = "function f(o) {\n  \"use strict\";\n  with (o) {}\n}\nf();\n";
    let outcome = parse_source(source, &registry, ParserConfig::default()).expect("no faults");
    let codes: Vec<&str> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, ["E010"]);
}

#[test]
fn evidence_is_attached_to_diagnostics() {
    let registry = EventRegistry::new();
    let source = "let x;\nlet x;\n";
    let outcome = parse_source(source, &registry, ParserConfig::default()).expect("no faults");
    assert_eq!(outcome.diagnostics[0].evidence.as_deref(), Some("let x;"));
    assert_eq!(outcome.diagnostics[0].line, 2);
}

#[test]
fn shebang_is_skipped() {
    let registry = EventRegistry::new();
    let outcome = parse_source("#!/usr/bin/env node\nvar a = 1;\na;\n", &registry, ParserConfig::default())
        .expect("no faults");
    assert!(outcome.diagnostics.is_empty());
    assert!(!outcome.aborted);
}

#[test]
fn registry_is_shared_across_threads() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Identifier, |ctx, rules| {
        if ctx.name.as_deref() == Some("bad") {
            rules.warn("W117", ctx, &["bad"]);
        }
        Ok(())
    });
    let sources = ["bad;\n", "good;\n", "bad; bad;\n"];
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let registry = &registry;
                scope.spawn(move || {
                    parse_source(source, registry, ParserConfig::default())
                        .expect("no faults")
                        .diagnostics
                        .len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("join")).collect()
    });
    assert_eq!(counts, [1, 0, 2]);
}
