use crate::directives::{CommentDirective, DirectiveKind, parse_comment};

fn directive(body: &str) -> crate::directives::Directive {
    match parse_comment(body) {
        Some(CommentDirective::Directive(directive)) => directive,
        other => panic!("expected a directive for {body:?}, got {other:?}"),
    }
}

#[test]
fn test_options_directive_entries() {
    let parsed = directive("jshint eqeqeq:true, maxlen:80, -W098");
    assert_eq!(parsed.kind, DirectiveKind::Options);
    let names: Vec<&str> = parsed.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["eqeqeq", "maxlen", "-W098"]);
    assert_eq!(parsed.entries[0].value.as_deref(), Some("true"));
    assert_eq!(parsed.entries[1].value.as_deref(), Some("80"));
    assert_eq!(parsed.entries[2].value, None);
}

#[test]
fn test_marker_aliases() {
    assert_eq!(directive("jslint evil:true").kind, DirectiveKind::Options);
    assert_eq!(directive("hintr evil:true").kind, DirectiveKind::Options);
    assert_eq!(directive("global foo").kind, DirectiveKind::Globals);
    assert_eq!(directive("globals foo").kind, DirectiveKind::Globals);
    assert_eq!(directive("exported foo").kind, DirectiveKind::Exported);
}

#[test]
fn test_globals_directive() {
    let parsed = directive(" global $, jQuery:true, -console ");
    let entries: Vec<(&str, Option<&str>)> = parsed
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.value.as_deref()))
        .collect();
    assert_eq!(
        entries,
        [("$", None), ("jQuery", Some("true")), ("-console", None)]
    );
}

#[test]
fn test_space_separated_names() {
    let parsed = directive("exported init main");
    let names: Vec<&str> = parsed.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["init", "main"]);
}

#[test]
fn test_line_comment_ignore() {
    let parsed = directive(" jshint ignore:line");
    assert_eq!(parsed.entries[0].name, "ignore");
    assert_eq!(parsed.entries[0].value.as_deref(), Some("line"));
}

#[test]
fn test_falls_through_spellings() {
    for body in [" falls through ", "fall through", "fallthrough", " falls thru. ", "FALLS THROUGH"] {
        assert_eq!(
            parse_comment(body),
            Some(CommentDirective::FallsThrough),
            "{body:?}"
        );
    }
}

#[test]
fn test_plain_comments_are_not_directives() {
    assert_eq!(parse_comment(" just a comment"), None);
    assert_eq!(parse_comment("jshinting is fun"), None);
    assert_eq!(parse_comment(" the global state"), None);
}

#[test]
fn test_malformed_entry() {
    assert_eq!(
        parse_comment("jshint eqeqeq:"),
        Some(CommentDirective::Malformed("eqeqeq:".to_string()))
    );
    assert_eq!(
        parse_comment("jshint a:b:c"),
        Some(CommentDirective::Malformed("a:b:c".to_string()))
    );
}

#[test]
fn test_empty_directive() {
    let parsed = directive("jshint");
    assert!(parsed.entries.is_empty());
}
