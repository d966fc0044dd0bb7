//! Parser state - token flow, directive comments, event firing and frames.
//!
//! The statement and expression productions live in the sibling
//! `state_*` modules; everything they share is here.

use super::{Abort, FunctionContext, ParseResult};
use crate::directives::{CommentDirective, Directive, DirectiveKind, parse_comment};
use crate::events::{EventContext, EventKind, EventRegistry, RuleContext, UnitState};
use crate::fault::InternalFault;
use crate::options::{
    OptionError, OptionSet, OptionType, lookup_option, parse_code_switch, validate_option,
};
use crate::scope::{EnvironmentProvider, FrameKind, KnownGlobals, LateUse, ScopeStack, UnusedEntry};
use crate::sink::DiagnosticSink;
use hintr_common::diagnostics::substitutions;
use hintr_common::limits::{
    DEFAULT_MAX_ERRORS, MAX_NESTING_DEPTH, STACK_RED_ZONE, STACK_SEGMENT_SIZE,
};
use hintr_common::{
    BindingKind, Diagnostic, ImpliedGlobal, LintSummary, OptionValue, Position, UnusedBinding,
    diagnostic_codes,
};
use hintr_scanner::{LexError, ScannerState, SyntaxKind, Token, TokenFlags, TokenValue};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{Level, debug, span, trace};

/// Inputs for one linted unit besides the source text.
pub struct ParserConfig<'a> {
    pub options: OptionSet,
    pub globals: KnownGlobals,
    pub max_errors: usize,
    pub environments: Option<&'a dyn EnvironmentProvider>,
}

impl Default for ParserConfig<'_> {
    fn default() -> Self {
        ParserConfig {
            options: OptionSet::new(),
            globals: KnownGlobals::new(),
            max_errors: DEFAULT_MAX_ERRORS,
            environments: None,
        }
    }
}

/// Everything the engine produced for one unit.
#[derive(Debug)]
pub struct ParseOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub summary: LintSummary,
    /// Parsing stopped at a fatal diagnostic.
    pub aborted: bool,
    pub lines_scanned: u32,
}

pub struct ParserState<'a> {
    pub(crate) scanner: ScannerState,
    pub(crate) current: Token,
    /// Position just past the previous significant token.
    pub(crate) prev_end: Position,
    pub(crate) lines: Vec<String>,
    line_offsets: Vec<u32>,
    pub(crate) registry: &'a EventRegistry,
    environments: Option<&'a dyn EnvironmentProvider>,
    pub(crate) globals: KnownGlobals,
    pub(crate) options: OptionSet,
    option_stack: Vec<OptionSet>,
    pub(crate) scopes: ScopeStack,
    pub(crate) sink: DiagnosticSink,
    unit_state: UnitState,
    pub(crate) functions: Vec<FunctionContext>,
    nesting: u32,
    pub(crate) disallow_in: bool,
    /// The next identifier read is the operand of `typeof`.
    pub(crate) typeof_pending: bool,
    /// Arrow look-ahead results by offset of the opening `(`.
    pub(crate) arrow_parens: FxHashMap<u32, bool>,
    /// A falls-through comment was seen since the last `case`.
    pub(crate) falls_through: bool,
    /// Names bound since the last reset, for `export` declarations.
    pub(crate) recent_declarations: Vec<String>,
    /// Unused bindings of frames already closed.
    closed_unused: Vec<UnusedBinding>,
    lines_emitted: u32,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &str, registry: &'a EventRegistry, config: ParserConfig<'a>) -> Self {
        let (lines, line_offsets) = split_lines(source);
        let mut state = ParserState {
            scanner: ScannerState::new(source),
            current: Token::end_of_file(Position::start()),
            prev_end: Position::start(),
            lines,
            line_offsets,
            registry,
            environments: config.environments,
            globals: config.globals,
            options: config.options,
            option_stack: Vec::new(),
            scopes: ScopeStack::new(),
            sink: DiagnosticSink::new(config.max_errors),
            unit_state: UnitState::default(),
            functions: vec![FunctionContext::new(false, false)],
            nesting: 0,
            disallow_in: false,
            typeof_pending: false,
            arrow_parens: FxHashMap::default(),
            falls_through: false,
            recent_declarations: Vec::new(),
            closed_unused: Vec::new(),
            lines_emitted: 0,
        };
        if let Some(max) = state.options.number("maxerr") {
            state.sink.set_max_errors(usize::try_from(max).unwrap_or(usize::MAX));
        }
        let enabled: Vec<&'static str> = crate::options::OPTION_CATALOG
            .iter()
            .filter(|spec| spec.ty == OptionType::Environment && state.options.is_enabled(spec.name))
            .map(|spec| spec.name)
            .collect();
        for name in enabled {
            state.enable_environment(name);
        }
        state
    }

    /// Lint the whole unit.
    ///
    /// `Err` means a rule misbehaved; syntax errors are reported as fatal
    /// diagnostics inside a normal outcome.
    pub fn parse(mut self) -> Result<ParseOutcome, InternalFault> {
        let _span = span!(Level::DEBUG, "parse_unit", lines = self.lines.len()).entered();
        self.scanner.scan_shebang_trivia();
        let result = self.next_token().and_then(|()| self.parse_program());
        let aborted = match result {
            Ok(()) => false,
            Err(Abort::Fatal) => true,
            Err(Abort::Fault(fault)) => return Err(fault),
        };
        self.finish(aborted)
    }

    fn parse_program(&mut self) -> ParseResult<()> {
        self.parse_directive_prologue()?;
        self.parse_statement_list(&[SyntaxKind::EndOfFileToken])?;
        Ok(())
    }

    // =========================================================================
    // Token flow
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current.kind
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    /// Current token is the plain (non-escaped, non-property) word `word`.
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        self.current.kind == SyntaxKind::Identifier
            && self.current.text == word
            && !self.current.flags.contains(TokenFlags::PROPERTY_NAME)
    }

    /// Advance to the next significant token.
    ///
    /// Comments are consumed here: directive comments update options and
    /// globals, everything else is dropped. `Line` events are fired for
    /// every line the scanner has moved past.
    pub(crate) fn next_token(&mut self) -> ParseResult<()> {
        let prev = &self.current;
        let length = u32::try_from(prev.text.chars().count()).unwrap_or(u32::MAX);
        self.prev_end = Position::new(
            prev.end_line,
            prev.pos.from,
            prev.pos.offset.saturating_add(length),
            prev.pos.from,
        );
        loop {
            let token = match self.scanner.scan_token() {
                Ok(token) => token,
                Err(err) => return Err(self.lex_fatal(&err)),
            };
            if token.kind.is_comment() {
                self.handle_comment(&token)?;
                continue;
            }
            trace!(kind = ?token.kind, line = token.pos.line, "token");
            self.current = token;
            break;
        }
        self.emit_lines_until(self.current.pos.line)
    }

    /// Consume `kind` or stop with "Expected '{a}' and instead saw '{b}'".
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.is_token(kind) {
            return self.next_token();
        }
        Err(self.error_expected(kind.text()))
    }

    /// Consume the closer of a bracket pair opened by `open`.
    pub(crate) fn parse_closing(&mut self, close: SyntaxKind, open: &Token) -> ParseResult<()> {
        self.check_closing(close, open)?;
        self.next_token()
    }

    /// Like `parse_closing`, without consuming the closer.
    pub(crate) fn check_closing(&mut self, close: SyntaxKind, open: &Token) -> ParseResult<()> {
        if self.is_token(close) {
            return Ok(());
        }
        let line = open.pos.line.to_string();
        let saw = self.current.display_text().to_string();
        Err(self.fatal(
            diagnostic_codes::EXPECTED_TO_MATCH,
            self.current.pos,
            &[close.text(), &open.text, &line, &saw],
        ))
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.is_token(kind) {
            self.next_token()?;
            return Ok(true);
        }
        Ok(false)
    }

    // =========================================================================
    // Look-ahead
    // =========================================================================

    /// Scan the next significant token without processing comments or
    /// firing events. A lexical error reads as end of input.
    pub(crate) fn scan_raw(&mut self) -> Token {
        loop {
            match self.scanner.scan_token() {
                Ok(token) if token.kind.is_comment() => continue,
                Ok(token) => return token,
                Err(err) => return Token::end_of_file(err.pos),
            }
        }
    }

    /// The token after the current one.
    pub(crate) fn peek_token(&mut self) -> Token {
        let snapshot = self.scanner.save_state();
        let token = self.scan_raw();
        self.scanner.restore_state(snapshot);
        token
    }

    pub(crate) fn peek_kind(&mut self) -> SyntaxKind {
        self.peek_token().kind
    }

    // =========================================================================
    // Directive comments
    // =========================================================================

    fn handle_comment(&mut self, token: &Token) -> ParseResult<()> {
        let TokenValue::Comment(body) = &token.value else {
            return Ok(());
        };
        let line_comment = token.kind == SyntaxKind::SingleLineCommentTrivia;
        match parse_comment(body) {
            None => Ok(()),
            Some(CommentDirective::FallsThrough) => {
                self.falls_through = true;
                Ok(())
            }
            Some(CommentDirective::Malformed(text)) => {
                self.raise(diagnostic_codes::BAD_OPTION, token.pos, &[&text])
            }
            Some(CommentDirective::Directive(directive)) => {
                // Only option directives may be written as line comments.
                if line_comment && directive.kind != DirectiveKind::Options {
                    return Ok(());
                }
                self.apply_directive(directive, token)
            }
        }
    }

    fn apply_directive(&mut self, directive: Directive, token: &Token) -> ParseResult<()> {
        let _span = span!(Level::DEBUG, "directive", kind = ?directive.kind, line = token.pos.line)
            .entered();
        match directive.kind {
            DirectiveKind::Options => self.apply_option_directive(directive, token),
            DirectiveKind::Globals => {
                for entry in directive.entries {
                    if let Some(name) = entry.name.strip_prefix('-') {
                        self.globals.remove(name);
                    } else {
                        let writable = entry.value.as_deref().is_some_and(|v| v.trim() == "true");
                        self.globals.insert(entry.name, writable);
                    }
                }
                Ok(())
            }
            DirectiveKind::Exported => {
                for entry in directive.entries {
                    self.scopes.mark_exported(&entry.name);
                }
                Ok(())
            }
        }
    }

    fn apply_option_directive(&mut self, directive: Directive, token: &Token) -> ParseResult<()> {
        let mut overrides = Vec::new();
        for entry in directive.entries {
            let name = entry.name.as_str();
            let raw = entry.value.as_deref();

            if name == "ignore" {
                match raw.map(str::trim) {
                    Some("start") => {
                        if !self.sink.begin_ignore(token.pos.line) {
                            self.raise(diagnostic_codes::UNMATCHED_DIRECTIVE, token.pos, &["ignore:start"])?;
                        }
                    }
                    Some("end") => {
                        if !self.sink.end_ignore(token.pos.line) {
                            self.raise(diagnostic_codes::UNMATCHED_DIRECTIVE, token.pos, &["ignore:end"])?;
                        }
                    }
                    Some("line") => self.sink.ignore_line(token.pos.line),
                    other => {
                        let shown = other.unwrap_or("");
                        self.raise(diagnostic_codes::BAD_OPTION_VALUE, token.pos, &[name, shown])?;
                    }
                }
                continue;
            }

            if let Some((code, disable)) = parse_code_switch(name) {
                overrides.push((format!("-{code}"), OptionValue::Bool(disable)));
                continue;
            }

            let value = raw.map_or(OptionValue::Bool(true), OptionValue::parse_directive_value);
            match validate_option(name, &value) {
                Err(OptionError::Unknown(_)) => {
                    self.raise(diagnostic_codes::BAD_OPTION, token.pos, &[name])?;
                }
                Err(OptionError::BadValue { .. }) => {
                    let shown = raw.unwrap_or("").trim();
                    self.raise(diagnostic_codes::BAD_OPTION_VALUE, token.pos, &[name, shown])?;
                }
                Ok(()) => {
                    if name == "maxerr" {
                        if let Some(max) = value.as_number() {
                            self.sink.set_max_errors(usize::try_from(max).unwrap_or(usize::MAX));
                        }
                    }
                    let is_environment =
                        lookup_option(name).is_some_and(|spec| spec.ty == OptionType::Environment);
                    if is_environment && value.is_enabled() {
                        self.enable_environment(name);
                    }
                    overrides.push((entry.name.clone(), value));
                }
            }
        }
        if !overrides.is_empty() {
            debug!(count = overrides.len(), "options changed by directive");
            self.options = self.options.derive(overrides);
        }
        Ok(())
    }

    fn enable_environment(&mut self, name: &str) {
        match self.environments.and_then(|provider| provider.environment(name)) {
            Some(names) => {
                debug!(environment = name, count = names.len(), "environment enabled");
                self.globals.extend_static(names);
            }
            None => trace!(environment = name, "no provider for environment"),
        }
    }

    // =========================================================================
    // Events and diagnostics
    // =========================================================================

    /// Dispatch `ctx` to its listeners under the current options.
    pub(crate) fn fire(&mut self, ctx: EventContext) -> ParseResult<()> {
        self.fire_with(&ctx, None)
    }

    /// Dispatch under `options` instead of the current options (used for
    /// events about a reference, reported after the reference was passed).
    fn fire_with(&mut self, ctx: &EventContext, options: Option<&OptionSet>) -> ParseResult<()> {
        if !self.registry.has_listeners(ctx.kind) {
            return Ok(());
        }
        let options = options.unwrap_or(&self.options);
        let mut rules = RuleContext::new(
            self.registry,
            options,
            &self.scopes,
            &self.globals,
            &mut self.sink,
            &mut self.unit_state,
        );
        if let Err(fault) = self.registry.dispatch(ctx, &mut rules) {
            return Err(Abort::Fault(InternalFault::from_rule(fault, ctx.kind, ctx.pos)));
        }
        self.check_overflow()
    }

    /// Engine-level, non-fatal diagnostic. Honors `-W###` switches.
    pub(crate) fn raise(&mut self, code: &'static str, pos: Position, values: &[&str]) -> ParseResult<()> {
        if !self.options.is_code_disabled(code) {
            self.sink.push(code, pos, &substitutions(values));
        }
        self.check_overflow()
    }

    /// Record a fatal diagnostic. The caller returns the `Abort`.
    pub(crate) fn fatal(&mut self, code: &'static str, pos: Position, values: &[&str]) -> Abort {
        debug!(code, line = pos.line, "fatal");
        self.sink.push_fatal(code, pos, &substitutions(values));
        Abort::Fatal
    }

    fn lex_fatal(&mut self, err: &LexError) -> Abort {
        debug!(code = err.code(), line = err.pos.line, "lexical error");
        self.sink.push_fatal(err.code(), err.pos, &err.substitutions());
        Abort::Fatal
    }

    pub(crate) fn error_expected(&mut self, expected: &str) -> Abort {
        let saw = self.current.display_text().to_string();
        self.fatal(diagnostic_codes::EXPECTED_INSTEAD_SAW, self.current.pos, &[expected, &saw])
    }

    pub(crate) fn error_unexpected(&mut self) -> Abort {
        let saw = self.current.display_text().to_string();
        self.fatal(diagnostic_codes::UNEXPECTED, self.current.pos, &[&saw])
    }

    fn check_overflow(&mut self) -> ParseResult<()> {
        if !self.sink.is_overflowed() {
            return Ok(());
        }
        let percent = self.percent_scanned().to_string();
        Err(self.fatal(diagnostic_codes::TOO_MANY_ERRORS, self.current.pos, &[&percent]))
    }

    fn percent_scanned(&self) -> u32 {
        let total = u32::try_from(self.lines.len()).unwrap_or(u32::MAX).max(1);
        (self.current.pos.line.min(total) * 100) / total
    }

    fn emit_lines_until(&mut self, line: u32) -> ParseResult<()> {
        while self.lines_emitted + 1 < line {
            let number = self.lines_emitted + 1;
            self.lines_emitted = number;
            if !self.registry.has_listeners(EventKind::Line) {
                continue;
            }
            let index = (number - 1) as usize;
            let Some(text) = self.lines.get(index) else {
                break;
            };
            let offset = self.line_offsets.get(index).copied().unwrap_or(0);
            let ctx = EventContext::new(EventKind::Line, Position::new(number, 1, offset, 1))
                .with_value(text.clone());
            self.fire(ctx)?;
        }
        Ok(())
    }

    // =========================================================================
    // Nesting, frames and bindings
    // =========================================================================

    /// Run `f` one level deeper, stopping with a fatal diagnostic past
    /// `MAX_NESTING_DEPTH`.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(self.fatal(diagnostic_codes::NESTING_TOO_DEEP, self.current.pos, &[]));
        }
        self.nesting += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || f(self));
        self.nesting -= 1;
        result
    }

    /// Enter a frame. Directive options seen inside it are dropped on exit.
    pub(crate) fn push_frame(&mut self, kind: FrameKind) {
        self.scopes.push(kind);
        self.option_stack.push(self.options.clone());
    }

    /// Leave a frame entered with `push_frame`. Call before consuming the
    /// frame's closing token so that directives after it survive.
    pub(crate) fn pop_frame(&mut self) -> ParseResult<()> {
        self.pop_scope()?;
        if let Some(options) = self.option_stack.pop() {
            self.options = options;
        }
        Ok(())
    }

    /// Enter a frame that only scopes bindings (`for` heads, catch parameters).
    pub(crate) fn push_scope(&mut self, kind: FrameKind) {
        self.scopes.push(kind);
    }

    pub(crate) fn pop_scope(&mut self) -> ParseResult<()> {
        match self.scopes.pop() {
            Some(exit) => {
                self.closed_unused.extend(exit.unused.iter().map(unused_binding));
                self.report_frame_exit(exit.unused, exit.late)
            }
            None => Ok(()),
        }
    }

    fn report_frame_exit(&mut self, unused: Vec<UnusedEntry>, late: Vec<LateUse>) -> ParseResult<()> {
        for entry in unused {
            let mut ctx = EventContext::new(EventKind::UnusedBinding, entry.binding.pos)
                .with_name(entry.name)
                .with_value(entry.binding.kind.as_str());
            ctx.binding = Some(entry.binding.kind);
            ctx.last_param = entry.last_param;
            self.fire(ctx)?;
        }
        for use_site in late {
            let mut ctx = EventContext::new(EventKind::UsedBeforeDefinition, use_site.use_pos)
                .with_name(use_site.name);
            ctx.binding = Some(use_site.binding.kind);
            ctx.start_line = use_site.binding.pos.line;
            ctx.start_char = use_site.binding.pos.character;
            self.fire_with(&ctx, Some(&use_site.options))?;
        }
        Ok(())
    }

    /// Bind the name spelled by `token` and fire a `Declaration` event.
    pub(crate) fn declare(
        &mut self,
        token: &Token,
        kind: BindingKind,
        param_index: Option<u32>,
    ) -> ParseResult<()> {
        let name = token.name();
        match self.scopes.declare(name, kind, token.pos, param_index) {
            Err(existing) => {
                debug!(name, ?existing, "illegal redeclaration");
                self.raise(diagnostic_codes::ALREADY_DECLARED, token.pos, &[name])
            }
            Ok(redeclares) => {
                self.recent_declarations.push(name.to_string());
                let mut ctx = EventContext::for_token(EventKind::Declaration, token)
                    .with_value(kind.as_str());
                ctx.binding = Some(kind);
                ctx.redeclares = redeclares;
                ctx.in_loop = self.in_loop();
                self.fire(ctx)
            }
        }
    }

    /// Record a read of the identifier `token` and fire an `Identifier` event.
    pub(crate) fn use_identifier(&mut self, token: &Token, in_typeof: bool) -> ParseResult<()> {
        // Every non-global function binds `arguments`.
        let implicit = token.name() == "arguments" && self.functions.len() > 1;
        if !implicit {
            self.scopes.use_name(token.name(), token.pos, &self.options, in_typeof);
        }
        let mut ctx = EventContext::for_token(EventKind::Identifier, token);
        ctx.is_property = false;
        self.fire(ctx)
    }

    /// Fire an `Identifier` event for a property name.
    pub(crate) fn fire_property_name(&mut self, token: &Token) -> ParseResult<()> {
        let mut ctx = EventContext::for_token(EventKind::Identifier, token);
        ctx.is_property = true;
        self.fire(ctx)
    }

    pub(crate) fn function_mut(&mut self) -> Option<&mut FunctionContext> {
        self.functions.last_mut()
    }

    pub(crate) fn add_complexity(&mut self) {
        if let Some(function) = self.function_mut() {
            function.metrics.complexity += 1;
        }
    }

    pub(crate) fn in_loop(&self) -> bool {
        self.functions.last().is_some_and(|f| f.loop_depth > 0)
    }

    pub(crate) fn in_async(&self) -> bool {
        self.functions.last().is_some_and(|f| f.is_async)
    }

    pub(crate) fn in_generator(&self) -> bool {
        self.functions.last().is_some_and(|f| f.is_generator)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    fn finish(mut self, mut aborted: bool) -> Result<ParseOutcome, InternalFault> {
        let total = u32::try_from(self.lines.len()).unwrap_or(u32::MAX);
        let lines_scanned = if aborted { self.current.pos.line.min(total) } else { total };

        let scopes = std::mem::take(&mut self.scopes);
        let exit = scopes.finish();

        let mut summary = LintSummary::default();
        summary.unused = std::mem::take(&mut self.closed_unused);
        summary.unused.extend(exit.unused.iter().map(unused_binding));
        summary.unused.sort_by_key(|b| (b.line, b.character));

        let mut implied: IndexMap<&str, Vec<u32>> = IndexMap::new();
        for pending in &exit.unresolved {
            if self.globals.contains(&pending.name) {
                continue;
            }
            let lines = implied.entry(pending.name.as_str()).or_default();
            if !lines.contains(&pending.pos.line) {
                lines.push(pending.pos.line);
            }
        }
        summary.implied_globals = implied
            .into_iter()
            .map(|(name, lines)| ImpliedGlobal {
                name: name.to_string(),
                lines,
            })
            .collect();

        if !aborted {
            let result = self.report_unit_end(exit.unused, exit.late, &exit.unresolved, total);
            match result {
                Ok(()) => {}
                Err(Abort::Fatal) => aborted = true,
                Err(Abort::Fault(fault)) => return Err(fault),
            }
        }

        debug!(
            diagnostics = self.sink.len(),
            implied = summary.implied_globals.len(),
            unused = summary.unused.len(),
            aborted,
            "unit finished"
        );
        let ParserState { sink, lines, .. } = self;
        Ok(ParseOutcome {
            diagnostics: sink.finish(&lines),
            summary,
            aborted,
            lines_scanned,
        })
    }

    fn report_unit_end(
        &mut self,
        unused: Vec<UnusedEntry>,
        late: Vec<LateUse>,
        unresolved: &[crate::scope::UnresolvedUse],
        total: u32,
    ) -> ParseResult<()> {
        self.emit_lines_until(total.saturating_add(1))?;
        self.report_frame_exit(unused, late)?;
        for pending in unresolved {
            if pending.in_typeof || self.globals.contains(&pending.name) {
                continue;
            }
            let mut ctx = EventContext::new(EventKind::ImpliedGlobal, pending.pos)
                .with_name(pending.name.clone());
            ctx.token = Some(SyntaxKind::Identifier);
            ctx.code = pending.is_write.then_some("write");
            self.fire_with(&ctx, Some(&pending.options))?;
        }
        Ok(())
    }
}

fn unused_binding(entry: &UnusedEntry) -> UnusedBinding {
    UnusedBinding {
        name: entry.name.clone(),
        kind: entry.binding.kind,
        line: entry.binding.pos.line,
        character: entry.binding.pos.character,
    }
}

/// Split on the same line terminators the scanner counts, returning each
/// line's text and starting character offset.
fn split_lines(source: &str) -> (Vec<String>, Vec<u32>) {
    let mut lines = Vec::new();
    let mut offsets = vec![0u32];
    let mut current = String::new();
    let mut offset = 0u32;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        offset += 1;
        match c {
            '\r' | '\n' | '\u{2028}' | '\u{2029}' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                    offset += 1;
                }
                lines.push(std::mem::take(&mut current));
                offsets.push(offset);
            }
            _ => current.push(c),
        }
    }
    lines.push(current);
    (lines, offsets)
}
