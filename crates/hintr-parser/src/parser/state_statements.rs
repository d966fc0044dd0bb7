//! Statement parsing.
//!
//! Each statement fires a `Statement` event when it starts. Control
//! statements report their test through `Condition` and their body through
//! `Block`; jumps (`return`, `throw`, `break`, `continue`) are tracked so
//! that unreachable code and switch fallthrough can be reported.

use super::state::ParserState;
use super::{Flow, ParseResult};
use crate::events::{EventContext, EventKind, StatementKind};
use crate::scope::FrameKind;
use hintr_common::{BindingKind, Position, diagnostic_codes};
use hintr_scanner::{SyntaxKind, Token};
use tracing::{Level, debug, span};

impl ParserState<'_> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// `"use strict"` and other directive strings at the start of a body.
    pub(crate) fn parse_directive_prologue(&mut self) -> ParseResult<()> {
        while self.is_token(SyntaxKind::StringLiteral) {
            let next = self.peek_token();
            let complete = matches!(
                next.kind,
                SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            ) || next.has_preceding_line_break();
            if !complete {
                break;
            }
            let token = self.current.clone();
            // Only the unescaped spelling counts.
            if token.string_value() == Some("use strict") && token.text.len() == 12 {
                debug!(line = token.pos.line, "strict mode directive");
                self.scopes.set_strict();
            }
            self.fire(EventContext::for_token(EventKind::String, &token))?;
            self.next_token()?;
            self.consume_semicolon()?;
        }
        Ok(())
    }

    /// Parse statements up to (not including) one of `until`.
    ///
    /// Returns how the list completes and how many statements it held.
    pub(crate) fn parse_statement_list(&mut self, until: &[SyntaxKind]) -> ParseResult<(Flow, u32)> {
        let mut flow = Flow::Normal;
        let mut count = 0;
        let mut reported = false;
        while !until.contains(&self.token()) && !self.is_token(SyntaxKind::EndOfFileToken) {
            if let Flow::Jump(keyword) = flow {
                // Function declarations are hoisted, so they are never dead.
                if !reported && !self.is_token(SyntaxKind::FunctionKeyword) {
                    let saw = self.current.display_text().to_string();
                    let mut ctx = EventContext::new(EventKind::Unreachable, self.current.pos)
                        .with_value(keyword)
                        .with_substitutions(&[&saw, keyword]);
                    ctx.token = Some(self.token());
                    self.fire(ctx)?;
                    reported = true;
                }
            }
            let next = self.parse_statement()?;
            count += 1;
            if !flow.is_jump() {
                flow = next;
            }
        }
        Ok((flow, count))
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Flow> {
        self.nested(|parser| parser.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        if !matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::SemicolonToken
        ) {
            if let Some(function) = self.function_mut() {
                function.metrics.statements += 1;
            }
        }

        match self.token() {
            SyntaxKind::OpenBraceToken => {
                self.fire_statement(StatementKind::Block, start)?;
                self.parse_block("block")
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(BindingKind::Var, StatementKind::Var),
            SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(BindingKind::Const, StatementKind::Const)
            }
            SyntaxKind::FunctionKeyword => {
                self.fire_statement(StatementKind::Function, start)?;
                self.parse_function_declaration(false)?;
                Ok(Flow::Normal)
            }
            SyntaxKind::ClassKeyword => {
                self.fire_statement(StatementKind::Class, start)?;
                self.parse_class(true)?;
                Ok(Flow::Normal)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.parse_break_or_continue(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.fire_statement(StatementKind::Debugger, start)?;
                self.next_token()?;
                self.consume_semicolon()?;
                Ok(Flow::Normal)
            }
            SyntaxKind::SemicolonToken => {
                let ctx = EventContext::for_token(EventKind::EmptyStatement, &self.current);
                self.fire(ctx)?;
                self.next_token()?;
                Ok(Flow::Normal)
            }
            SyntaxKind::ImportKeyword
                if !matches!(self.peek_kind(), SyntaxKind::OpenParenToken | SyntaxKind::DotToken) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::Identifier => {
                if self.is_lexical_declaration_start() {
                    return self.parse_variable_statement(BindingKind::Let, StatementKind::Let);
                }
                if self.is_async_function_start() {
                    self.fire_statement(StatementKind::Function, start)?;
                    self.next_token()?;
                    self.parse_function_declaration(true)?;
                    return Ok(Flow::Normal);
                }
                if self.peek_kind() == SyntaxKind::ColonToken {
                    return self.parse_labeled_statement();
                }
                self.parse_expression_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` followed by something that can only be a binding.
    pub(crate) fn is_lexical_declaration_start(&mut self) -> bool {
        self.is_contextual("let")
            && matches!(
                self.peek_kind(),
                SyntaxKind::Identifier | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
            )
    }

    /// `async function` with no line break in between.
    pub(crate) fn is_async_function_start(&mut self) -> bool {
        if !self.is_contextual("async") {
            return false;
        }
        let next = self.peek_token();
        next.kind == SyntaxKind::FunctionKeyword && !next.has_preceding_line_break()
    }

    fn fire_statement(&mut self, kind: StatementKind, pos: Position) -> ParseResult<()> {
        let mut ctx = EventContext::new(EventKind::Statement, pos).with_value(self.current.text.clone());
        ctx.token = Some(self.token());
        ctx.statement = Some(kind);
        ctx.in_loop = self.in_loop();
        self.fire(ctx)
    }

    /// Terminate a statement: an explicit `;`, or an inserted one before
    /// `}`, end of input or a line break.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.is_token(SyntaxKind::SemicolonToken) {
            return self.next_token();
        }
        if self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.current.has_preceding_line_break()
        {
            let mut ctx = EventContext::new(EventKind::MissingSemicolon, self.prev_end)
                .with_name(self.current.display_text().to_string());
            ctx.token = Some(self.token());
            ctx.start_line = self.current.pos.line;
            ctx.start_char = self.current.pos.character;
            return self.fire(ctx);
        }
        Err(self.fatal(diagnostic_codes::MISSING_SEMICOLON_FATAL, self.prev_end, &[]))
    }

    // =========================================================================
    // Blocks and bodies
    // =========================================================================

    fn enter_block(&mut self, owner: &'static str, braced: bool, pos: Position) -> ParseResult<()> {
        let mut depth = 0;
        if let Some(function) = self.function_mut() {
            if braced {
                function.block_depth += 1;
                function.metrics.max_depth = function.metrics.max_depth.max(function.block_depth);
            }
            depth = function.block_depth;
        }
        let mut ctx = EventContext::new(EventKind::Block, pos)
            .with_name(owner)
            .with_value(self.current.display_text().to_string());
        ctx.token = Some(self.token());
        ctx.braced = braced;
        ctx.depth = depth;
        self.fire(ctx)
    }

    fn leave_block(&mut self, braced: bool) {
        if let Some(function) = self.function_mut() {
            if braced {
                function.block_depth = function.block_depth.saturating_sub(1);
            }
        }
    }

    /// `{ ... }` with its own frame. `owner` names the statement it belongs to.
    pub(crate) fn parse_block(&mut self, owner: &'static str) -> ParseResult<Flow> {
        let open = self.current.clone();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.error_expected("{"));
        }
        self.enter_block(owner, true, open.pos)?;
        // Directives right after `{` are read while scanning past it.
        self.push_frame(FrameKind::Block);
        self.next_token()?;
        let (flow, _) = self.parse_statement_list(&[SyntaxKind::CloseBraceToken])?;
        self.check_closing(SyntaxKind::CloseBraceToken, &open)?;
        self.pop_frame()?;
        self.leave_block(true);
        self.next_token()?;
        Ok(flow)
    }

    /// Body of a control statement, braced or not.
    fn parse_body(&mut self, owner: &'static str) -> ParseResult<Flow> {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return self.parse_block(owner);
        }
        let pos = self.current.pos;
        self.enter_block(owner, false, pos)?;
        let flow = self.parse_statement()?;
        self.leave_block(false);
        Ok(flow)
    }

    fn parse_loop_body(&mut self, owner: &'static str) -> ParseResult<Flow> {
        if let Some(function) = self.function_mut() {
            function.loop_depth += 1;
        }
        let result = self.parse_body(owner);
        if let Some(function) = self.function_mut() {
            function.loop_depth = function.loop_depth.saturating_sub(1);
        }
        result.map(|_| Flow::Normal)
    }

    /// `( expression )` of a control statement, reported as a `Condition`.
    fn parse_condition(&mut self, owner: &'static str) -> ParseResult<()> {
        let open = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        self.parse_condition_expression(owner)?;
        self.parse_closing(SyntaxKind::CloseParenToken, &open)
    }

    fn parse_condition_expression(&mut self, owner: &'static str) -> ParseResult<()> {
        let expr = self.parse_expression()?;
        let mut ctx = EventContext::new(EventKind::Condition, expr.pos).with_name(owner);
        ctx.expr = Some(expr.kind);
        ctx.parenthesized = expr.parenthesized;
        ctx.value = expr.literal;
        self.fire(ctx)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self, kind: BindingKind, statement: StatementKind) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(statement, start)?;
        self.parse_variable_declarations(kind, false)?;
        self.consume_semicolon()?;
        Ok(Flow::Normal)
    }

    /// `var`/`let`/`const` and its declarator list. The current token is the
    /// keyword. Returns the number of declarators.
    pub(crate) fn parse_variable_declarations(&mut self, kind: BindingKind, in_for: bool) -> ParseResult<u32> {
        self.next_token()?;
        let mut count = 0;
        loop {
            let target = self.current.clone();
            let name = self.parse_binding_target(kind, None)?;
            count += 1;
            if self.is_token(SyntaxKind::EqualsToken) {
                self.next_token()?;
                let saved = std::mem::replace(&mut self.disallow_in, in_for);
                let result = self.parse_assignment_expression();
                self.disallow_in = saved;
                result?;
            } else if kind == BindingKind::Const && !in_for {
                if let Some(name) = &name {
                    self.raise(diagnostic_codes::CONST_WITHOUT_INITIALIZER, target.pos, &[name])?;
                }
            }
            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            self.fire_line_break()?;
            self.next_token()?;
        }
        Ok(count)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::If, start)?;
        self.next_token()?;
        self.add_complexity();
        self.parse_condition("if")?;
        let then_flow = self.parse_body("if")?;
        if !self.is_token(SyntaxKind::ElseKeyword) {
            return Ok(Flow::Normal);
        }
        self.next_token()?;
        // `else if` is a chain, not an unbraced body.
        let else_flow = if self.is_token(SyntaxKind::IfKeyword) {
            self.parse_statement()?
        } else {
            self.parse_body("else")?
        };
        if then_flow.is_jump() && else_flow.is_jump() {
            Ok(else_flow)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn parse_while_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::While, start)?;
        self.next_token()?;
        self.add_complexity();
        self.parse_condition("while")?;
        self.parse_loop_body("while")
    }

    fn parse_do_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::DoWhile, start)?;
        self.next_token()?;
        self.add_complexity();
        self.parse_loop_body("do")?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        self.parse_condition("while")?;
        // The semicolon after `do ... while (...)` is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken)?;
        Ok(Flow::Normal)
    }

    fn parse_for_statement(&mut self) -> ParseResult<Flow> {
        let for_token = self.current.clone();
        let _span = span!(Level::TRACE, "for_statement", line = for_token.pos.line).entered();
        self.next_token()?;
        if self.is_contextual("await") {
            self.next_token()?;
        }
        let open = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        self.push_scope(FrameKind::Block);
        self.add_complexity();

        let mut init = None;
        match self.token() {
            SyntaxKind::SemicolonToken => {}
            SyntaxKind::VarKeyword => {
                self.parse_variable_declarations(BindingKind::Var, true)?;
            }
            SyntaxKind::ConstKeyword => {
                self.parse_variable_declarations(BindingKind::Const, true)?;
            }
            _ if self.is_lexical_declaration_start() => {
                self.parse_variable_declarations(BindingKind::Let, true)?;
            }
            _ => {
                let saved = std::mem::replace(&mut self.disallow_in, true);
                let result = self.parse_expression();
                self.disallow_in = saved;
                init = Some(result?);
            }
        }

        let kind = if self.is_token(SyntaxKind::InKeyword) {
            StatementKind::ForIn
        } else if self.is_contextual("of") {
            StatementKind::ForOf
        } else {
            StatementKind::For
        };

        if kind == StatementKind::For {
            self.parse_expected(SyntaxKind::SemicolonToken)?;
            if !self.is_token(SyntaxKind::SemicolonToken) {
                self.parse_condition_expression("for")?;
            }
            self.parse_expected(SyntaxKind::SemicolonToken)?;
            if !self.is_token(SyntaxKind::CloseParenToken) {
                self.parse_expression()?;
            }
            self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
            self.fire_statement(StatementKind::For, for_token.pos)?;
        } else {
            if let Some(init) = init.as_ref() {
                if let Some(name) = init.name.as_deref().filter(|_| init.is_identifier()) {
                    self.scopes.retract_use(name);
                }
                if init.is_pattern() {
                    for (name, _) in &init.targets {
                        self.scopes.retract_use(name);
                    }
                }
            }
            self.next_token()?;
            if kind == StatementKind::ForIn {
                self.parse_expression()?;
            } else {
                self.parse_assignment_expression()?;
            }
            self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
            let mut ctx = EventContext::new(EventKind::Statement, for_token.pos).with_value("for");
            ctx.token = Some(SyntaxKind::ForKeyword);
            ctx.statement = Some(kind);
            ctx.braced = self.is_token(SyntaxKind::OpenBraceToken);
            ctx.body = self.peek_body_kind();
            ctx.in_loop = self.in_loop();
            self.fire(ctx)?;
        }

        self.parse_loop_body("for")?;
        self.pop_scope()?;
        Ok(Flow::Normal)
    }

    /// Kind of the first statement of the body about to be parsed, or
    /// `None` for an empty block.
    fn peek_body_kind(&mut self) -> Option<StatementKind> {
        match self.token() {
            SyntaxKind::IfKeyword => Some(StatementKind::If),
            SyntaxKind::OpenBraceToken => match self.peek_kind() {
                SyntaxKind::IfKeyword => Some(StatementKind::If),
                SyntaxKind::CloseBraceToken => None,
                _ => Some(StatementKind::Expression),
            },
            SyntaxKind::SemicolonToken => Some(StatementKind::Empty),
            _ => Some(StatementKind::Expression),
        }
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Switch, start)?;
        self.next_token()?;
        let paren = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        self.parse_expression()?;
        self.parse_closing(SyntaxKind::CloseParenToken, &paren)?;

        let open = self.current.clone();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.error_expected("{"));
        }
        self.enter_block("switch", true, open.pos)?;
        self.push_frame(FrameKind::Block);
        self.next_token()?;

        // Statement count and completion of the previous clause.
        let mut previous: Option<(u32, Flow)> = None;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let clause = self.current.clone();
            if !matches!(clause.kind, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword) {
                return Err(self.error_expected("case"));
            }
            if let Some((count, flow)) = previous {
                if count > 0 && !flow.is_jump() && !self.falls_through {
                    let ctx = EventContext::for_token(EventKind::Fallthrough, &clause)
                        .with_substitutions(&[&clause.text]);
                    self.fire(ctx)?;
                }
            }
            self.falls_through = false;
            self.next_token()?;
            if clause.kind == SyntaxKind::CaseKeyword {
                self.add_complexity();
                self.parse_expression()?;
            }
            self.parse_expected(SyntaxKind::ColonToken)?;
            let (flow, count) = self.parse_statement_list(&[
                SyntaxKind::CaseKeyword,
                SyntaxKind::DefaultKeyword,
                SyntaxKind::CloseBraceToken,
            ])?;
            previous = Some((count, flow));
        }

        self.pop_frame()?;
        self.leave_block(true);
        self.next_token()?;
        Ok(Flow::Normal)
    }

    fn parse_try_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Try, start)?;
        self.next_token()?;
        self.parse_block("try")?;

        let mut handled = false;
        if self.is_token(SyntaxKind::CatchKeyword) {
            handled = true;
            self.next_token()?;
            self.add_complexity();
            self.push_scope(FrameKind::Block);
            if self.is_token(SyntaxKind::OpenParenToken) {
                let open = self.current.clone();
                self.next_token()?;
                self.parse_binding_target(BindingKind::Catch, None)?;
                self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
            }
            self.parse_block("catch")?;
            self.pop_scope()?;
        }
        if self.is_token(SyntaxKind::FinallyKeyword) {
            handled = true;
            self.next_token()?;
            self.parse_block("finally")?;
        }
        if !handled {
            return Err(self.error_expected("catch"));
        }
        Ok(Flow::Normal)
    }

    fn parse_return_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Return, start)?;
        self.next_token()?;
        if !self.at_statement_end() {
            self.parse_expression()?;
        }
        self.consume_semicolon()?;
        Ok(Flow::Jump("return"))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Throw, start)?;
        self.next_token()?;
        self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Flow::Jump("throw"))
    }

    fn parse_break_or_continue(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        let (keyword, kind) = if self.is_token(SyntaxKind::BreakKeyword) {
            ("break", StatementKind::Break)
        } else {
            ("continue", StatementKind::Continue)
        };
        self.fire_statement(kind, start)?;
        self.next_token()?;
        if self.is_token(SyntaxKind::Identifier) && !self.current.has_preceding_line_break() {
            let label = self.current.clone();
            if !self.scopes.has_label(label.name()) {
                self.raise(diagnostic_codes::NOT_A_LABEL, label.pos, &[label.name()])?;
            }
            self.next_token()?;
        }
        self.consume_semicolon()?;
        Ok(Flow::Jump(keyword))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::With, start)?;
        if self.scopes.is_strict() {
            self.raise(diagnostic_codes::WITH_IN_STRICT_MODE, start, &[])?;
        }
        self.next_token()?;
        let open = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        self.parse_expression()?;
        self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
        self.parse_body("with")
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Flow> {
        let label = self.current.clone();
        self.fire_statement(StatementKind::Labeled, label.pos)?;
        self.next_token()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        if !self.scopes.declare_label(label.name()) {
            self.raise(diagnostic_codes::ALREADY_DECLARED, label.pos, &[label.name()])?;
        }
        let result = self.parse_statement();
        self.scopes.remove_label(label.name());
        result.map(|_| Flow::Normal)
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Expression, start)?;
        let expr = self.parse_expression()?;
        let mut ctx = EventContext::new(EventKind::ExpressionStatement, expr.pos);
        ctx.statement = Some(StatementKind::Expression);
        ctx.expr = Some(expr.kind);
        ctx.parenthesized = expr.parenthesized;
        ctx.name = expr.name;
        ctx.value = expr.literal;
        ctx.operands[0] = expr.path;
        self.fire(ctx)?;
        self.consume_semicolon()?;
        Ok(Flow::Normal)
    }

    /// Nothing more belongs to the current statement (restricted productions).
    pub(crate) fn at_statement_end(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.current.has_preceding_line_break()
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn expect_contextual(&mut self, word: &str) -> ParseResult<()> {
        if self.is_contextual(word) {
            return self.next_token();
        }
        Err(self.error_expected(word))
    }

    fn parse_module_specifier(&mut self) -> ParseResult<()> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error_expected("(string)"));
        }
        let ctx = EventContext::for_token(EventKind::String, &self.current);
        self.fire(ctx)?;
        self.next_token()
    }

    /// Any identifier, keyword or string usable as an imported/exported name.
    fn parse_module_export_name(&mut self) -> ParseResult<Token> {
        let token = self.current.clone();
        if !(token.kind == SyntaxKind::Identifier
            || token.kind == SyntaxKind::StringLiteral
            || token.kind.is_keyword())
        {
            return Err(self.error_expected("(identifier)"));
        }
        self.next_token()?;
        Ok(token)
    }

    fn parse_import_declaration(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Import, start)?;
        self.next_token()?;
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_module_specifier()?;
            self.consume_semicolon()?;
            return Ok(Flow::Normal);
        }

        let mut needs_more = true;
        if self.is_token(SyntaxKind::Identifier) {
            let local = self.expect_binding_identifier()?;
            self.declare(&local, BindingKind::Import, None)?;
            needs_more = self.parse_optional(SyntaxKind::CommaToken)?;
        }
        if needs_more {
            if self.is_token(SyntaxKind::AsteriskToken) {
                self.next_token()?;
                self.expect_contextual("as")?;
                let local = self.expect_binding_identifier()?;
                self.declare(&local, BindingKind::Import, None)?;
            } else if self.is_token(SyntaxKind::OpenBraceToken) {
                let open = self.current.clone();
                self.next_token()?;
                while !self.is_token(SyntaxKind::CloseBraceToken) {
                    let imported = self.parse_module_export_name()?;
                    let local = if self.is_contextual("as") {
                        self.next_token()?;
                        self.expect_binding_identifier()?
                    } else if imported.kind == SyntaxKind::Identifier {
                        imported
                    } else {
                        let saw = imported.text.clone();
                        return Err(self.fatal(
                            diagnostic_codes::EXPECTED_IDENTIFIER,
                            imported.pos,
                            &[&saw],
                        ));
                    };
                    self.declare(&local, BindingKind::Import, None)?;
                    if !self.parse_optional(SyntaxKind::CommaToken)? {
                        break;
                    }
                }
                self.parse_closing(SyntaxKind::CloseBraceToken, &open)?;
            } else {
                return Err(self.error_unexpected());
            }
        }
        self.expect_contextual("from")?;
        self.parse_module_specifier()?;
        self.consume_semicolon()?;
        Ok(Flow::Normal)
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Flow> {
        let start = self.current.pos;
        self.fire_statement(StatementKind::Export, start)?;
        self.next_token()?;
        self.recent_declarations.clear();

        match self.token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token()?;
                let named = self.peek_kind() == SyntaxKind::Identifier;
                if self.is_token(SyntaxKind::FunctionKeyword) && named {
                    self.parse_function_declaration(false)?;
                } else if self.is_token(SyntaxKind::ClassKeyword) && named {
                    self.parse_class(true)?;
                } else if self.is_async_function_start() {
                    self.next_token()?;
                    self.parse_function_expression(true)?;
                } else {
                    self.parse_assignment_expression()?;
                    self.consume_semicolon()?;
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token()?;
                if self.is_contextual("as") {
                    self.next_token()?;
                    self.parse_module_export_name()?;
                }
                self.expect_contextual("from")?;
                self.parse_module_specifier()?;
                self.consume_semicolon()?;
            }
            SyntaxKind::OpenBraceToken => {
                let open = self.current.clone();
                self.next_token()?;
                let mut locals = Vec::new();
                while !self.is_token(SyntaxKind::CloseBraceToken) {
                    let local = self.parse_module_export_name()?;
                    if self.is_contextual("as") {
                        self.next_token()?;
                        self.parse_module_export_name()?;
                    }
                    locals.push(local);
                    if !self.parse_optional(SyntaxKind::CommaToken)? {
                        break;
                    }
                }
                self.parse_closing(SyntaxKind::CloseBraceToken, &open)?;
                if self.is_contextual("from") {
                    self.next_token()?;
                    self.parse_module_specifier()?;
                } else {
                    for local in locals.iter().filter(|t| t.kind == SyntaxKind::Identifier) {
                        self.use_identifier(local, false)?;
                    }
                }
                self.consume_semicolon()?;
            }
            SyntaxKind::VarKeyword => {
                self.parse_variable_statement(BindingKind::Var, StatementKind::Var)?;
            }
            SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(BindingKind::Const, StatementKind::Const)?;
            }
            SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword => {
                self.parse_statement()?;
            }
            _ if self.is_lexical_declaration_start() || self.is_async_function_start() => {
                self.parse_statement()?;
            }
            _ => return Err(self.error_unexpected()),
        }

        for name in std::mem::take(&mut self.recent_declarations) {
            self.scopes.mark_exported(&name);
        }
        Ok(Flow::Normal)
    }
}
