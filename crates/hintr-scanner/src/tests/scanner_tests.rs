use super::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    tokenize(source)
        .expect("source should tokenize")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn scan_one(source: &str) -> Token {
    let mut scanner = ScannerState::new(source);
    scanner.scan_token().expect("token should scan")
}

fn scan_error(source: &str) -> LexError {
    tokenize(source).expect_err("source should fail to tokenize")
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new("");
    let token = scanner.scan_token().unwrap();
    assert_eq!(token.kind, SyntaxKind::EndOfFileToken);
    assert_eq!(token.display_text(), "(end)");
}

#[test]
fn test_scan_punctuation() {
    assert_eq!(
        kinds("{}()[];,"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CommaToken,
        ]
    );
}

#[test]
fn test_scan_compound_operators() {
    assert_eq!(
        kinds("a === b !== c >>>= d ?? e ?.f ??= g **= h => i"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::AsteriskAsteriskEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_division_after_identifier() {
    assert_eq!(
        kinds("a/b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_regexp_after_return() {
    let tokens = tokenize("return /x/g").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, SyntaxKind::ReturnKeyword);
    assert_eq!(tokens[1].kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(
        tokens[1].value,
        TokenValue::RegExp {
            body: "x".to_string(),
            flags: "g".to_string()
        }
    );
}

#[test]
fn test_regexp_with_slash_in_class() {
    let tokens = tokenize("x = /[/]+/;").unwrap();
    assert_eq!(tokens[2].kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(tokens[2].text, "/[/]+/");
    assert_eq!(tokens[3].kind, SyntaxKind::SemicolonToken);
}

#[test]
fn test_division_after_close_paren() {
    assert_eq!(
        kinds("(a) / 2"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::SlashToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_invalid_regexp_flag() {
    let err = scan_error("x = /a/gq");
    assert_eq!(err.kind, LexErrorKind::InvalidRegExpFlag('q'));
}

#[test]
fn test_duplicate_regexp_flag() {
    let err = scan_error("x = /a/gg");
    assert_eq!(err.kind, LexErrorKind::InvalidRegExpFlag('g'));
}

#[test]
fn test_keyword_after_dot_is_property_name() {
    let tokens = tokenize("a.return / 2").unwrap();
    assert_eq!(tokens[2].kind, SyntaxKind::Identifier);
    assert!(tokens[2].flags.contains(TokenFlags::PROPERTY_NAME));
    assert_eq!(tokens[3].kind, SyntaxKind::SlashToken);
}

#[test]
fn test_strict_reserved_word_is_identifier() {
    let token = scan_one("yield");
    assert_eq!(token.kind, SyntaxKind::Identifier);
    assert!(token.flags.contains(TokenFlags::STRICT_RESERVED));
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("var a;\n  b = 1;").unwrap();
    let b = &tokens[3];
    assert_eq!(b.name(), "b");
    assert_eq!(b.pos.line, 2);
    assert_eq!(b.pos.character, 3);
    assert_eq!(b.pos.from, 4);
    assert_eq!(b.pos.offset, 9);
    assert!(b.has_preceding_line_break());
    assert!(!tokens[1].has_preceding_line_break());
}

#[test]
fn test_crlf_counts_as_one_line() {
    let tokens = tokenize("a\r\nb\rc\u{2028}d").unwrap();
    let lines: Vec<u32> = tokens.iter().map(|t| t.pos.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);
}

#[test]
fn test_string_escapes() {
    let token = scan_one(r#""a\n\t\x41B\u{43}\'""#);
    assert_eq!(token.kind, SyntaxKind::StringLiteral);
    assert_eq!(token.string_value(), Some("a\n\tABC'"));
    assert_eq!(token.quote(), Some('"'));
}

#[test]
fn test_string_surrogate_pair_escape() {
    let token = scan_one(r#"'\uD83D\uDE00'"#);
    assert_eq!(token.string_value(), Some("\u{1F600}"));
}

#[test]
fn test_string_legacy_octal_escape() {
    let token = scan_one(r#"'\101\0'"#);
    assert_eq!(token.string_value(), Some("A\0"));
    assert!(token.flags.contains(TokenFlags::OCTAL_ESCAPE));
}

#[test]
fn test_string_line_continuation() {
    let tokens = tokenize("'a\\\nb'; c").unwrap();
    assert_eq!(tokens[0].string_value(), Some("ab"));
    assert!(tokens[0].flags.contains(TokenFlags::MULTILINE));
    assert_eq!(tokens[0].end_line, 2);
    assert_eq!(tokens[2].pos.line, 2);
}

#[test]
fn test_unterminated_string_at_line_break() {
    let err = scan_error("var s = 'abc\nfoo();");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.pos.line, 1);
    assert_eq!(err.pos.character, 9);
    assert_eq!(err.code(), "E029");
}

#[test]
fn test_unterminated_string_at_end_of_input() {
    let err = scan_error("'abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn test_bad_hex_escape() {
    let err = scan_error(r#"'\xZZ'"#);
    assert!(matches!(err.kind, LexErrorKind::InvalidEscape(_)));
}

#[test]
fn test_numbers() {
    let cases: &[(&str, f64)] = &[
        ("42", 42.0),
        ("3.25", 3.25),
        ("1e3", 1000.0),
        ("2.5E-1", 0.25),
        ("0x1F", 31.0),
        ("0o17", 15.0),
        ("0b101", 5.0),
        ("1_000_000", 1_000_000.0),
    ];
    for &(source, expected) in cases {
        let token = scan_one(source);
        assert_eq!(token.kind, SyntaxKind::NumericLiteral, "{source}");
        assert_eq!(token.number_value(), Some(expected), "{source}");
    }
}

#[test]
fn test_number_flags() {
    assert!(scan_one(".5").flags.contains(TokenFlags::LEADING_DECIMAL));
    assert_eq!(scan_one(".5").number_value(), Some(0.5));
    assert!(scan_one("5.").flags.contains(TokenFlags::TRAILING_DECIMAL));
    assert!(!scan_one("5.0").flags.contains(TokenFlags::TRAILING_DECIMAL));
    assert!(scan_one("10n").flags.contains(TokenFlags::BIGINT));

    let octal = scan_one("017");
    assert!(octal.flags.contains(TokenFlags::LEGACY_OCTAL));
    assert_eq!(octal.number_value(), Some(15.0));
    assert_eq!(scan_one("089").number_value(), Some(89.0));
}

#[test]
fn test_malformed_numbers() {
    assert!(matches!(
        scan_error("3in x").kind,
        LexErrorKind::MalformedNumber(_)
    ));
    assert!(matches!(
        scan_error("1e+").kind,
        LexErrorKind::MalformedNumber(_)
    ));
    assert!(matches!(
        scan_error("0x").kind,
        LexErrorKind::MalformedNumber(_)
    ));
}

#[test]
fn test_template_with_substitutions() {
    let tokens = tokenize("`a${b}c${ {d} }e`").unwrap();
    let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateMiddle,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::TemplateTail,
        ]
    );
    assert_eq!(tokens[0].string_value(), Some("a"));
    assert_eq!(tokens[2].string_value(), Some("c"));
    assert_eq!(tokens[6].string_value(), Some("e"));
}

#[test]
fn test_multi_line_template_tracks_lines() {
    let tokens = tokenize("`a\nb`; x").unwrap();
    assert_eq!(tokens[0].kind, SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(tokens[0].string_value(), Some("a\nb"));
    assert_eq!(tokens[0].end_line, 2);
    assert_eq!(tokens[2].pos.line, 2);
}

#[test]
fn test_unterminated_template() {
    assert_eq!(
        scan_error("`abc${d}").kind,
        LexErrorKind::UnterminatedTemplate
    );
}

#[test]
fn test_comments_are_tokens() {
    let tokens = tokenize("a // tail\n/* block */ b").unwrap();
    assert_eq!(tokens[1].kind, SyntaxKind::SingleLineCommentTrivia);
    assert_eq!(tokens[1].value, TokenValue::Comment(" tail".to_string()));
    assert_eq!(tokens[2].kind, SyntaxKind::MultiLineCommentTrivia);
    assert_eq!(tokens[2].value, TokenValue::Comment(" block ".to_string()));
    assert!(tokens[3].has_preceding_line_break());
}

#[test]
fn test_multi_line_comment_counts_as_line_break() {
    let tokens = tokenize("a /*\n*/ b").unwrap();
    assert_eq!(tokens[2].pos.line, 2);
    assert!(tokens[2].has_preceding_line_break());
}

#[test]
fn test_comment_does_not_change_regexp_context() {
    let tokens = tokenize("a /* c */ / b").unwrap();
    assert_eq!(tokens[2].kind, SyntaxKind::SlashToken);
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(
        scan_error("a /* never closed").kind,
        LexErrorKind::UnterminatedComment
    );
}

#[test]
fn test_unicode_escaped_identifier() {
    let token = scan_one(r"\u0061bc");
    assert_eq!(token.kind, SyntaxKind::Identifier);
    assert_eq!(token.name(), "abc");
    assert_eq!(token.text, r"\u0061bc");
    assert!(token.flags.contains(TokenFlags::UNICODE_ESCAPE));
}

#[test]
fn test_non_ascii_identifier() {
    let tokens = tokenize("var café = ñandú;").unwrap();
    assert_eq!(tokens[1].name(), "café");
    assert_eq!(tokens[3].name(), "ñandú");
}

#[test]
fn test_private_identifier() {
    let token = scan_one("#secret");
    assert_eq!(token.kind, SyntaxKind::PrivateIdentifier);
    assert_eq!(token.name(), "#secret");
}

#[test]
fn test_invalid_character() {
    assert_eq!(scan_error("a @ b").kind, LexErrorKind::InvalidCharacter('@'));
}

#[test]
fn test_shebang_is_skipped() {
    let tokens = tokenize("#!/usr/bin/env node\nfoo").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].name(), "foo");
    assert_eq!(tokens[0].pos.line, 2);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("a => b");
    let snapshot = scanner.save_state();
    assert_eq!(scanner.scan_token().unwrap().kind, SyntaxKind::Identifier);
    assert_eq!(
        scanner.scan_token().unwrap().kind,
        SyntaxKind::EqualsGreaterThanToken
    );
    scanner.restore_state(snapshot);
    let token = scanner.scan_token().unwrap();
    assert_eq!(token.name(), "a");
    assert_eq!(token.pos.character, 1);
}

#[test]
fn test_token_calls_and_iteration_share_one_cursor() {
    let mut scanner = ScannerState::new("a + b;");
    assert_eq!(scanner.scan_token().unwrap().name(), "a");
    let rest: Vec<SyntaxKind> = scanner
        .by_ref()
        .map(|token| token.map(|t| t.kind))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rest,
        [
            SyntaxKind::PlusToken,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken
        ]
    );
    assert!(scanner.next().is_none());
}

#[test]
fn test_keywords_recognized() {
    assert_eq!(scan_one("function").kind, SyntaxKind::FunctionKeyword);
    assert_eq!(scan_one("instanceof").kind, SyntaxKind::InstanceOfKeyword);
    assert_eq!(scan_one("functional").kind, SyntaxKind::Identifier);
    assert!(is_reserved_word("enum"));
    assert!(!is_reserved_word("undefined"));
}
