//! Scanner - converts a character buffer into positioned tokens on demand.
//!
//! The scanner is single-pass. It remembers the previous significant token
//! (comments are not significant) to decide whether `/` starts a regular
//! expression, and it keeps a brace stack so that the `}` closing a template
//! substitution resumes scanning of the surrounding template.
//!
//! It never inserts or drops tokens: automatic semicolon insertion is the
//! parser's job, the scanner only records whether a line terminator preceded
//! each token (`TokenFlags::PRECEDING_LINE_BREAK`).

use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_octal_digit,
    is_white_space_single_line,
};
use crate::error::{LexError, LexErrorKind};
use crate::reserved::{WordClass, classify_word};
use crate::syntax_kind::SyntaxKind;
use crate::token::{Token, TokenFlags, TokenValue};
use hintr_common::Position;

/// Punctuators ordered so that longer spellings are tried first.
const PUNCTUATORS: &[(&str, SyntaxKind)] = &[
    (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
    ("...", SyntaxKind::DotDotDotToken),
    ("===", SyntaxKind::EqualsEqualsEqualsToken),
    ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
    ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
    (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
    ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
    ("||=", SyntaxKind::BarBarEqualsToken),
    ("??=", SyntaxKind::QuestionQuestionEqualsToken),
    ("=>", SyntaxKind::EqualsGreaterThanToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("**", SyntaxKind::AsteriskAsteriskToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("??", SyntaxKind::QuestionQuestionToken),
    ("?.", SyntaxKind::QuestionDotToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (".", SyntaxKind::DotToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("%", SyntaxKind::PercentToken),
    ("/", SyntaxKind::SlashToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("!", SyntaxKind::ExclamationToken),
    ("~", SyntaxKind::TildeToken),
    ("?", SyntaxKind::QuestionToken),
    (":", SyntaxKind::ColonToken),
    ("=", SyntaxKind::EqualsToken),
];

const REGEXP_FLAGS: &str = "dgimsuyv";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BraceKind {
    Block,
    TemplateSubstitution,
}

/// Everything needed to rewind the scanner for bounded look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    line: u32,
    line_start: usize,
    prev_significant: Option<SyntaxKind>,
    brace_stack: Vec<BraceKind>,
    preceding_line_break: bool,
}

pub struct ScannerState {
    text: Vec<char>,
    pos: usize,
    line: u32,
    line_start: usize,
    prev_significant: Option<SyntaxKind>,
    brace_stack: Vec<BraceKind>,
    preceding_line_break: bool,
    token_start: usize,
    token_line: u32,
    token_character: u32,
}

impl ScannerState {
    pub fn new(source: &str) -> Self {
        ScannerState {
            text: source.chars().collect(),
            pos: 0,
            line: 1,
            line_start: 0,
            prev_significant: None,
            brace_stack: Vec::new(),
            preceding_line_break: false,
            token_start: 0,
            token_line: 1,
            token_character: 1,
        }
    }

    /// Skip a `#!` line at the very start of the buffer.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.peek() == Some('#') && self.peek_at(1) == Some('!') {
            while let Some(c) = self.peek() {
                if is_line_break(c) {
                    break;
                }
                self.pos += 1;
            }
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn source_len(&self) -> usize {
        self.text.len()
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            line: self.line,
            line_start: self.line_start,
            prev_significant: self.prev_significant,
            brace_stack: self.brace_stack.clone(),
            preceding_line_break: self.preceding_line_break,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.line = snapshot.line;
        self.line_start = snapshot.line_start;
        self.prev_significant = snapshot.prev_significant;
        self.brace_stack = snapshot.brace_stack;
        self.preceding_line_break = snapshot.preceding_line_break;
    }

    /// Whether a `/` at the current position opens a regular expression.
    pub fn regex_allowed(&self) -> bool {
        match self.prev_significant {
            None => true,
            Some(kind) => !kind.ends_expression(),
        }
    }

    /// Scan the next token, comments included.
    pub fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_line = self.line;
        self.token_character = self.column();

        let Some(ch) = self.peek() else {
            return Ok(self.make_token(
                SyntaxKind::EndOfFileToken,
                TokenValue::None,
                TokenFlags::empty(),
            ));
        };

        match ch {
            '/' => match self.peek_at(1) {
                Some('/') => Ok(self.scan_single_line_comment()),
                Some('*') => self.scan_multi_line_comment(),
                _ if self.regex_allowed() => self.scan_regular_expression(),
                _ => self.scan_punctuator(ch),
            },
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template(true)
            }
            '}' if self.brace_stack.last() == Some(&BraceKind::TemplateSubstitution) => {
                self.brace_stack.pop();
                self.pos += 1;
                self.scan_template(false)
            }
            '0'..='9' => self.scan_number(),
            '.' if matches!(self.peek_at(1), Some('0'..='9')) => self.scan_number(),
            '#' => self.scan_private_identifier(),
            '\\' => self.scan_identifier(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuator(ch),
        }
    }

    // =========================================================================
    // Cursor helpers
    // =========================================================================

    #[inline]
    fn peek(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn column(&self) -> u32 {
        (self.pos - self.line_start) as u32 + 1
    }

    fn token_position(&self) -> Position {
        Position::new(
            self.token_line,
            self.token_character,
            self.token_start as u32,
            self.column(),
        )
    }

    fn error_at_token(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.token_position())
    }

    fn error_here(&self, kind: LexErrorKind) -> LexError {
        let column = self.column();
        LexError::new(
            kind,
            Position::new(self.line, column, self.pos as u32, column),
        )
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    /// Consume one line terminator (CRLF counts as one).
    fn consume_line_break(&mut self) {
        if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        self.line += 1;
        self.line_start = self.pos;
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if is_line_break(c) {
                self.consume_line_break();
                self.preceding_line_break = true;
            } else if is_white_space_single_line(c) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn make_token(&mut self, kind: SyntaxKind, value: TokenValue, flags: TokenFlags) -> Token {
        let mut flags = flags;
        if self.preceding_line_break {
            flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        if !kind.is_comment() {
            self.preceding_line_break = false;
            self.prev_significant = Some(kind);
        }
        Token {
            kind,
            text: self.slice(self.token_start, self.pos),
            value,
            pos: self.token_position(),
            end_line: self.line,
            flags,
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    fn scan_single_line_comment(&mut self) -> Token {
        self.pos += 2;
        let body_start = self.pos;
        while let Some(c) = self.peek() {
            if is_line_break(c) {
                break;
            }
            self.pos += 1;
        }
        let body = self.slice(body_start, self.pos);
        self.make_token(
            SyntaxKind::SingleLineCommentTrivia,
            TokenValue::Comment(body),
            TokenFlags::empty(),
        )
    }

    fn scan_multi_line_comment(&mut self) -> Result<Token, LexError> {
        self.pos += 2;
        let body_start = self.pos;
        let mut contains_line_break = false;
        let body_end = loop {
            match self.peek() {
                None => return Err(self.error_at_token(LexErrorKind::UnterminatedComment)),
                Some('*') if self.peek_at(1) == Some('/') => {
                    let end = self.pos;
                    self.pos += 2;
                    break end;
                }
                Some(c) if is_line_break(c) => {
                    self.consume_line_break();
                    contains_line_break = true;
                }
                Some(_) => self.pos += 1,
            }
        };
        let body = self.slice(body_start, body_end);
        let token = self.make_token(
            SyntaxKind::MultiLineCommentTrivia,
            TokenValue::Comment(body),
            TokenFlags::empty(),
        );
        if contains_line_break {
            self.preceding_line_break = true;
        }
        Ok(token)
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn scan_regular_expression(&mut self) -> Result<Token, LexError> {
        self.pos += 1;
        let body_start = self.pos;
        let mut in_class = false;
        loop {
            match self.peek() {
                None => return Err(self.error_at_token(LexErrorKind::UnterminatedRegExp)),
                Some(c) if is_line_break(c) => {
                    return Err(self.error_at_token(LexErrorKind::UnterminatedRegExp));
                }
                Some('\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(c) if !is_line_break(c) => self.pos += 1,
                        _ => return Err(self.error_at_token(LexErrorKind::UnterminatedRegExp)),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some('/') if !in_class => break,
                Some(_) => self.pos += 1,
            }
        }
        let body = self.slice(body_start, self.pos);
        self.pos += 1;

        let mut flags = String::new();
        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            if !REGEXP_FLAGS.contains(c) || flags.contains(c) {
                return Err(self.error_here(LexErrorKind::InvalidRegExpFlag(c)));
            }
            flags.push(c);
            self.pos += 1;
        }

        Ok(self.make_token(
            SyntaxKind::RegularExpressionLiteral,
            TokenValue::RegExp { body, flags },
            TokenFlags::empty(),
        ))
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, LexError> {
        self.pos += 1;
        let mut value = String::new();
        let mut flags = TokenFlags::empty();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at_token(LexErrorKind::UnterminatedString));
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            match c {
                '\n' | '\r' => {
                    return Err(self.error_at_token(LexErrorKind::UnterminatedString));
                }
                '\\' => {
                    self.pos += 1;
                    self.scan_escape(&mut value, &mut flags, false)?;
                }
                _ => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
        Ok(self.make_token(
            SyntaxKind::StringLiteral,
            TokenValue::Str { value, quote },
            flags,
        ))
    }

    /// Scan a template fragment. The opening `` ` `` or `}` has been consumed.
    fn scan_template(&mut self, from_backtick: bool) -> Result<Token, LexError> {
        let mut cooked = String::new();
        let mut flags = TokenFlags::empty();
        let kind = loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at_token(LexErrorKind::UnterminatedTemplate));
            };
            match c {
                '`' => {
                    self.pos += 1;
                    break if from_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.peek_at(1) == Some('{') => {
                    self.pos += 2;
                    self.brace_stack.push(BraceKind::TemplateSubstitution);
                    break if from_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    self.pos += 1;
                    self.scan_escape(&mut cooked, &mut flags, true)?;
                }
                c if is_line_break(c) => {
                    cooked.push('\n');
                    self.consume_line_break();
                }
                _ => {
                    cooked.push(c);
                    self.pos += 1;
                }
            }
        };
        Ok(self.make_token(kind, TokenValue::Template(cooked), flags))
    }

    /// Decode one escape sequence; the backslash has been consumed.
    fn scan_escape(
        &mut self,
        value: &mut String,
        flags: &mut TokenFlags,
        in_template: bool,
    ) -> Result<(), LexError> {
        let escape_start = self.pos - 1;
        let Some(c) = self.peek() else {
            let kind = if in_template {
                LexErrorKind::UnterminatedTemplate
            } else {
                LexErrorKind::UnterminatedString
            };
            return Err(self.error_at_token(kind));
        };

        match c {
            c if is_line_break(c) => {
                self.consume_line_break();
                *flags |= TokenFlags::MULTILINE;
            }
            'n' | 't' | 'r' | 'b' | 'f' | 'v' => {
                value.push(match c {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'b' => '\u{0008}',
                    'f' => '\u{000C}',
                    _ => '\u{000B}',
                });
                self.pos += 1;
            }
            '0' if !matches!(self.peek_at(1), Some('0'..='9')) => {
                value.push('\0');
                self.pos += 1;
            }
            '0'..='9' => {
                if in_template {
                    self.pos += 1;
                    return Err(self.error_here(LexErrorKind::InvalidEscape(
                        self.slice(escape_start, self.pos),
                    )));
                }
                *flags |= TokenFlags::OCTAL_ESCAPE;
                if c == '8' || c == '9' {
                    value.push(c);
                    self.pos += 1;
                } else {
                    let max_digits = if c <= '3' { 3 } else { 2 };
                    let mut code = 0u32;
                    let mut digits = 0;
                    while digits < max_digits {
                        match self.peek() {
                            Some(d) if is_octal_digit(d) => {
                                code = code * 8 + d.to_digit(8).unwrap_or(0);
                                self.pos += 1;
                                digits += 1;
                            }
                            _ => break,
                        }
                    }
                    value.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                }
            }
            'x' => {
                self.pos += 1;
                let code = self.scan_hex_digits(2, 2);
                match code {
                    Some(code) => value.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                    None => {
                        return Err(self.error_here(LexErrorKind::InvalidEscape(
                            self.slice(escape_start, self.pos),
                        )));
                    }
                }
            }
            'u' => {
                self.pos += 1;
                let Some(code) = self.scan_unicode_escape_body() else {
                    return Err(self.error_here(LexErrorKind::InvalidEscape(
                        self.slice(escape_start, self.pos),
                    )));
                };
                self.push_code_point(value, code);
            }
            _ => {
                value.push(c);
                self.pos += 1;
            }
        }
        Ok(())
    }

    /// Read between `min` and `max` hex digits.
    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let mut code = 0u32;
        let mut count = 0;
        while count < max {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    code = code.checked_mul(16)?.checked_add(d)?;
                    self.pos += 1;
                    count += 1;
                }
                None => break,
            }
        }
        (count >= min).then_some(code)
    }

    /// `XXXX` or `{X...}` after `\u`.
    fn scan_unicode_escape_body(&mut self) -> Option<u32> {
        if self.peek() == Some('{') {
            self.pos += 1;
            let code = self.scan_hex_digits(1, 8)?;
            if self.peek() != Some('}') || code > 0x10FFFF {
                return None;
            }
            self.pos += 1;
            Some(code)
        } else {
            self.scan_hex_digits(4, 4)
        }
    }

    /// Push a decoded code point, joining `😀` style surrogate pairs.
    fn push_code_point(&mut self, value: &mut String, code: u32) {
        if (0xD800..=0xDBFF).contains(&code) && self.starts_with("\\u") {
            let snapshot = self.pos;
            self.pos += 2;
            match self.scan_hex_digits(4, 4) {
                Some(low) if (0xDC00..=0xDFFF).contains(&low) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    value.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    return;
                }
                _ => self.pos = snapshot,
            }
        }
        value.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
    }

    fn scan_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                digits.push(c);
                self.pos += 1;
            } else if c == '_'
                && !digits.is_empty()
                && self.peek_at(1).is_some_and(|n| n.is_digit(radix))
            {
                self.pos += 1;
            } else {
                break;
            }
        }
        digits
    }

    fn scan_number(&mut self) -> Result<Token, LexError> {
        let mut flags = TokenFlags::empty();
        let first = self.peek().unwrap_or('0');
        let radix = match (first, self.peek_at(1)) {
            ('0', Some('x' | 'X')) => Some(16),
            ('0', Some('o' | 'O')) => Some(8),
            ('0', Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.scan_digits(radix);
            if digits.is_empty() {
                return Err(self.error_at_token(LexErrorKind::MalformedNumber(
                    self.slice(self.token_start, self.pos),
                )));
            }
            if self.peek() == Some('n') {
                self.pos += 1;
                flags |= TokenFlags::BIGINT;
            }
            digits.chars().fold(0f64, |acc, d| {
                acc * f64::from(radix) + f64::from(d.to_digit(radix).unwrap_or(0))
            })
        } else if first == '0' && matches!(self.peek_at(1), Some('0'..='9')) {
            self.pos += 1;
            let digits = self.scan_digits(10);
            flags |= TokenFlags::LEGACY_OCTAL;
            if digits.chars().all(is_octal_digit) {
                digits
                    .chars()
                    .fold(0f64, |acc, d| acc * 8.0 + f64::from(d.to_digit(8).unwrap_or(0)))
            } else {
                digits.parse::<f64>().unwrap_or(f64::NAN)
            }
        } else {
            let leading_dot = first == '.';
            let mut has_dot = false;
            let mut has_fraction = false;
            let mut has_exponent = false;
            let mut literal = self.scan_digits(10);
            if self.peek() == Some('.') {
                has_dot = true;
                self.pos += 1;
                let fraction = self.scan_digits(10);
                has_fraction = !fraction.is_empty();
                literal.push('.');
                literal.push_str(&fraction);
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                has_exponent = true;
                self.pos += 1;
                literal.push('e');
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    literal.push(sign);
                    self.pos += 1;
                }
                let exponent = self.scan_digits(10);
                if exponent.is_empty() {
                    return Err(self.error_at_token(LexErrorKind::MalformedNumber(
                        self.slice(self.token_start, self.pos),
                    )));
                }
                literal.push_str(&exponent);
            }
            if !has_dot && !has_exponent && self.peek() == Some('n') {
                self.pos += 1;
                flags |= TokenFlags::BIGINT;
            }
            if leading_dot {
                flags |= TokenFlags::LEADING_DECIMAL;
            } else if has_dot && !has_fraction && !has_exponent {
                flags |= TokenFlags::TRAILING_DECIMAL;
            }
            if literal.starts_with('.') {
                literal.insert(0, '0');
            }
            if literal.ends_with('.') {
                literal.push('0');
            }
            literal.parse::<f64>().unwrap_or(f64::NAN)
        };

        if let Some(c) = self.peek() {
            if is_identifier_start(c) || c.is_ascii_digit() || c == '\\' {
                self.pos += 1;
                return Err(self.error_at_token(LexErrorKind::MalformedNumber(
                    self.slice(self.token_start, self.pos),
                )));
            }
        }

        Ok(self.make_token(SyntaxKind::NumericLiteral, TokenValue::Number(value), flags))
    }

    // =========================================================================
    // Names
    // =========================================================================

    fn scan_identifier_escape(&mut self) -> Result<char, LexError> {
        let escape_start = self.pos;
        self.pos += 1;
        if self.peek() != Some('u') {
            return Err(self.error_here(LexErrorKind::InvalidEscape(
                self.slice(escape_start, self.pos),
            )));
        }
        self.pos += 1;
        self.scan_unicode_escape_body()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                self.error_here(LexErrorKind::InvalidEscape(
                    self.slice(escape_start, self.pos),
                ))
            })
    }

    fn scan_identifier(&mut self) -> Result<Token, LexError> {
        let mut name = String::new();
        let mut flags = TokenFlags::empty();

        loop {
            let is_first = name.is_empty();
            match self.peek() {
                Some('\\') => {
                    let escape_start = self.pos;
                    let c = self.scan_identifier_escape()?;
                    let valid = if is_first {
                        is_identifier_start(c)
                    } else {
                        is_identifier_part(c)
                    };
                    if !valid {
                        return Err(self.error_here(LexErrorKind::InvalidEscape(
                            self.slice(escape_start, self.pos),
                        )));
                    }
                    name.push(c);
                    flags |= TokenFlags::UNICODE_ESCAPE;
                }
                Some(c) if is_first || is_identifier_part(c) => {
                    name.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let after_dot = matches!(
            self.prev_significant,
            Some(SyntaxKind::DotToken | SyntaxKind::QuestionDotToken)
        );
        let kind = if after_dot {
            flags |= TokenFlags::PROPERTY_NAME;
            SyntaxKind::Identifier
        } else {
            match classify_word(&name) {
                WordClass::Keyword(kind) => kind,
                WordClass::StrictReserved => {
                    flags |= TokenFlags::STRICT_RESERVED;
                    SyntaxKind::Identifier
                }
                WordClass::Plain => SyntaxKind::Identifier,
            }
        };

        Ok(self.make_token(kind, TokenValue::Name(name), flags))
    }

    fn scan_private_identifier(&mut self) -> Result<Token, LexError> {
        match self.peek_at(1) {
            Some(c) if is_identifier_start(c) => {}
            _ => return Err(self.error_at_token(LexErrorKind::InvalidCharacter('#'))),
        }
        self.pos += 1;
        let mut name = String::from("#");
        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        Ok(self.make_token(
            SyntaxKind::PrivateIdentifier,
            TokenValue::Name(name),
            TokenFlags::empty(),
        ))
    }

    // =========================================================================
    // Punctuation
    // =========================================================================

    fn scan_punctuator(&mut self, ch: char) -> Result<Token, LexError> {
        let Some(&(text, mut kind)) = PUNCTUATORS.iter().find(|(text, _)| self.starts_with(text))
        else {
            self.pos += 1;
            return Err(self.error_at_token(LexErrorKind::InvalidCharacter(ch)));
        };
        let mut len = text.chars().count();
        // `a?.5:b` is a conditional, not optional chaining.
        if kind == SyntaxKind::QuestionDotToken && matches!(self.peek_at(2), Some('0'..='9')) {
            kind = SyntaxKind::QuestionToken;
            len = 1;
        }
        self.pos += len;
        match kind {
            SyntaxKind::OpenBraceToken => self.brace_stack.push(BraceKind::Block),
            SyntaxKind::CloseBraceToken => {
                self.brace_stack.pop();
            }
            _ => {}
        }
        Ok(self.make_token(kind, TokenValue::None, TokenFlags::empty()))
    }
}

impl Iterator for ScannerState {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to, but not including, end of input. A lex error is
    /// yielded once and ends the sequence.
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        match self.scan_token() {
            Ok(token) if token.kind == SyntaxKind::EndOfFileToken => {
                self.pos = self.text.len() + 1;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.pos = self.text.len() + 1;
                Some(Err(err))
            }
        }
    }
}
