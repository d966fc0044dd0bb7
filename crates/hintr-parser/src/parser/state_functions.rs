//! Functions, arrow functions, classes and binding patterns.

use super::state::ParserState;
use super::state_expressions::PropertyKey;
use super::{ExprInfo, FunctionContext, ParseResult};
use crate::events::{EventContext, EventKind, ExprKind};
use crate::scope::FrameKind;
use hintr_common::{BindingKind, Position, diagnostic_codes};
use hintr_scanner::{SyntaxKind, Token};
use tracing::{Level, span};

/// What kind of function-like production is being parsed.
#[derive(Clone, Debug)]
struct FunctionHead {
    name: Option<Token>,
    pos: Position,
    expr: ExprKind,
    is_async: bool,
    is_generator: bool,
    /// Named function expression: the name is visible inside the body only.
    binds_own_name: bool,
    /// Class members are always strict.
    strict: bool,
}

impl FunctionHead {
    fn new(pos: Position, expr: ExprKind) -> Self {
        FunctionHead {
            name: None,
            pos,
            expr,
            is_async: false,
            is_generator: false,
            binds_own_name: false,
            strict: false,
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_ref().map_or("(anonymous)", Token::name)
    }
}

impl ParserState<'_> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// `function name(...) {...}`. The current token is `function`.
    pub(crate) fn parse_function_declaration(&mut self, is_async: bool) -> ParseResult<()> {
        let mut head = FunctionHead::new(self.current.pos, ExprKind::Function);
        head.is_async = is_async;
        self.next_token()?;
        head.is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        let name = self.expect_binding_identifier()?;
        self.declare(&name, BindingKind::Function, None)?;
        head.name = Some(name);
        self.parse_function_rest(&head)
    }

    /// `function [name](...) {...}` in expression position.
    pub(crate) fn parse_function_expression(&mut self, is_async: bool) -> ParseResult<ExprInfo> {
        let mut head = FunctionHead::new(self.current.pos, ExprKind::Function);
        head.is_async = is_async;
        self.next_token()?;
        head.is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        if self.is_token(SyntaxKind::Identifier) {
            head.name = Some(self.expect_binding_identifier()?);
            head.binds_own_name = true;
        }
        self.parse_function_rest(&head)?;
        Ok(ExprInfo::new(ExprKind::Function, head.pos))
    }

    /// Object or class method; the current token is `(`.
    pub(crate) fn parse_method(
        &mut self,
        key: &PropertyKey,
        is_async: bool,
        is_generator: bool,
        strict: bool,
    ) -> ParseResult<()> {
        let pos = key.token.as_ref().map_or(self.current.pos, |t| t.pos);
        let mut head = FunctionHead::new(pos, ExprKind::Function);
        head.name = key.token.clone().filter(|t| t.kind == SyntaxKind::Identifier);
        head.is_async = is_async;
        head.is_generator = is_generator;
        head.strict = strict;
        self.parse_function_rest(&head)
    }

    fn parse_function_rest(&mut self, head: &FunctionHead) -> ParseResult<()> {
        let _span = span!(Level::DEBUG, "function", name = head.display_name(), line = head.pos.line)
            .entered();
        self.enter_function(head)?;
        if head.binds_own_name {
            if let Some(name) = &head.name {
                self.declare_own_name(name);
            }
        }
        let parameters = self.parse_parameters()?;
        self.set_parameter_count(parameters);
        self.parse_function_body(head)
    }

    /// `(a, b)` or `a` followed by `=>` and a body or expression.
    pub(crate) fn parse_arrow_function(&mut self, is_async: bool) -> ParseResult<ExprInfo> {
        let mut head = FunctionHead::new(self.current.pos, ExprKind::Arrow);
        head.is_async = is_async;
        if is_async {
            self.next_token()?;
        }
        self.enter_function(&head)?;
        let parameters = if self.is_token(SyntaxKind::Identifier) {
            let param = self.expect_binding_identifier()?;
            self.declare(&param, BindingKind::Param, Some(0))?;
            1
        } else {
            self.parse_parameters()?
        };
        self.set_parameter_count(parameters);
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_body(&head)?;
        } else {
            self.parse_assignment_expression()?;
            self.leave_function(&head)?;
        }
        Ok(ExprInfo::new(ExprKind::Arrow, head.pos))
    }

    fn enter_function(&mut self, head: &FunctionHead) -> ParseResult<()> {
        let mut ctx = EventContext::new(EventKind::FunctionEnter, head.pos);
        ctx.name = head.name.as_ref().map(|t| t.name().to_string());
        ctx.expr = Some(head.expr);
        ctx.in_loop = self.in_loop();
        self.fire(ctx)?;
        self.push_frame(FrameKind::Function);
        if head.strict {
            self.scopes.set_strict();
        }
        self.functions
            .push(FunctionContext::new(head.is_async, head.is_generator));
        Ok(())
    }

    /// Fire `FunctionExit` while the function's frame is still visible, then
    /// close the frame.
    fn leave_function(&mut self, head: &FunctionHead) -> ParseResult<()> {
        let metrics = self.functions.pop().map(|f| f.metrics).unwrap_or_default();
        let mut ctx = EventContext::new(EventKind::FunctionExit, head.pos);
        ctx.name = head.name.as_ref().map(|t| t.name().to_string());
        ctx.expr = Some(head.expr);
        ctx.in_loop = self.in_loop();
        ctx.metrics = Some(metrics);
        self.fire(ctx)?;
        self.pop_frame()
    }

    /// The name of a named function expression, counted as used so that it
    /// is never reported.
    fn declare_own_name(&mut self, token: &Token) {
        if self
            .scopes
            .declare(token.name(), BindingKind::Function, token.pos, None)
            .is_ok()
        {
            self.scopes.use_name(token.name(), token.pos, &self.options, false);
        }
    }

    fn set_parameter_count(&mut self, count: u32) {
        if let Some(function) = self.function_mut() {
            function.metrics.parameters = count;
        }
    }

    /// `( params )`. Returns the number of parameters.
    fn parse_parameters(&mut self) -> ParseResult<u32> {
        let open = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut index = 0;
        while !self.is_token(SyntaxKind::CloseParenToken) {
            if self.parse_optional(SyntaxKind::DotDotDotToken)? {
                self.parse_binding_target(BindingKind::Param, Some(index))?;
            } else {
                self.parse_binding_element(BindingKind::Param, Some(index))?;
            }
            index += 1;
            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            self.fire_line_break()?;
            self.next_token()?;
        }
        self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
        Ok(index)
    }

    fn parse_function_body(&mut self, head: &FunctionHead) -> ParseResult<()> {
        let open = self.current.clone();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.error_expected("{"));
        }
        self.next_token()?;
        self.with_in_allowed(|parser| {
            parser.parse_directive_prologue()?;
            parser.parse_statement_list(&[SyntaxKind::CloseBraceToken])
        })?;
        self.check_closing(SyntaxKind::CloseBraceToken, &open)?;
        self.leave_function(head)?;
        self.next_token()
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// `class [name] [extends expr] { members }`.
    pub(crate) fn parse_class(&mut self, is_declaration: bool) -> ParseResult<ExprInfo> {
        let pos = self.current.pos;
        self.next_token()?;
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.expect_binding_identifier()?;
            if is_declaration {
                self.declare(&name, BindingKind::Class, None)?;
            }
        } else if is_declaration {
            let saw = self.current.display_text().to_string();
            return Err(self.fatal(diagnostic_codes::EXPECTED_IDENTIFIER, self.current.pos, &[&saw]));
        }
        if self.parse_optional(SyntaxKind::ExtendsKeyword)? {
            self.parse_left_hand_side_expression()?;
        }

        let open = self.current.clone();
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return Err(self.error_expected("{"));
        }
        self.next_token()?;
        self.push_scope(FrameKind::Block);
        self.scopes.set_strict();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_class_member()?;
        }
        self.check_closing(SyntaxKind::CloseBraceToken, &open)?;
        self.pop_scope()?;
        self.next_token()?;
        Ok(ExprInfo::new(ExprKind::Class, pos))
    }

    fn parse_class_member(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken)? {
            return Ok(());
        }
        if self.is_contextual("static")
            && !matches!(
                self.peek_kind(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
            )
        {
            self.next_token()?;
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.parse_block("static")?;
                return Ok(());
            }
        }

        let mut is_async = false;
        let modifier = self.is_contextual("get") || self.is_contextual("set") || self.is_contextual("async");
        if modifier && self.is_method_modifier() {
            is_async = self.is_contextual("async");
            self.next_token()?;
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken)?;
        let key = self.parse_property_key()?;
        self.fire_property_key(&key)?;
        if self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_method(&key, is_async, is_generator, true);
        }

        // Field declaration.
        if self.parse_optional(SyntaxKind::EqualsToken)? {
            self.parse_assignment_expression()?;
        }
        self.consume_semicolon()
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    pub(crate) fn expect_binding_identifier(&mut self) -> ParseResult<Token> {
        let token = self.current.clone();
        if token.kind != SyntaxKind::Identifier {
            let saw = token.display_text().to_string();
            return Err(self.fatal(diagnostic_codes::EXPECTED_IDENTIFIER, token.pos, &[&saw]));
        }
        self.next_token()?;
        Ok(token)
    }

    /// A name or destructuring pattern to bind as `kind`. Returns the name
    /// for a plain identifier.
    pub(crate) fn parse_binding_target(
        &mut self,
        kind: BindingKind,
        param_index: Option<u32>,
    ) -> ParseResult<Option<String>> {
        match self.token() {
            SyntaxKind::OpenBracketToken => {
                self.parse_array_binding_pattern(kind, param_index)?;
                Ok(None)
            }
            SyntaxKind::OpenBraceToken => {
                self.parse_object_binding_pattern(kind, param_index)?;
                Ok(None)
            }
            _ => {
                let token = self.expect_binding_identifier()?;
                self.declare(&token, kind, param_index)?;
                Ok(Some(token.name().to_string()))
            }
        }
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(
        &mut self,
        kind: BindingKind,
        param_index: Option<u32>,
    ) -> ParseResult<()> {
        self.parse_binding_target(kind, param_index)?;
        if self.parse_optional(SyntaxKind::EqualsToken)? {
            self.with_in_allowed(|parser| parser.parse_assignment_expression())?;
        }
        Ok(())
    }

    fn parse_array_binding_pattern(&mut self, kind: BindingKind, param_index: Option<u32>) -> ParseResult<()> {
        let open = self.current.clone();
        self.next_token()?;
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.parse_optional(SyntaxKind::CommaToken)? {
                continue;
            }
            if self.parse_optional(SyntaxKind::DotDotDotToken)? {
                self.parse_binding_target(kind, param_index)?;
            } else {
                self.parse_binding_element(kind, param_index)?;
            }
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.parse_closing(SyntaxKind::CloseBracketToken, &open)
    }

    fn parse_object_binding_pattern(&mut self, kind: BindingKind, param_index: Option<u32>) -> ParseResult<()> {
        let open = self.current.clone();
        self.next_token()?;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.parse_optional(SyntaxKind::DotDotDotToken)? {
                let rest = self.expect_binding_identifier()?;
                self.declare(&rest, kind, param_index)?;
            } else {
                let key = self.parse_property_key()?;
                if self.parse_optional(SyntaxKind::ColonToken)? {
                    self.fire_property_key(&key)?;
                    self.parse_binding_element(kind, param_index)?;
                } else if key.is_plain_identifier() {
                    if let Some(name) = &key.token {
                        self.declare(name, kind, param_index)?;
                    }
                    if self.parse_optional(SyntaxKind::EqualsToken)? {
                        self.with_in_allowed(|parser| parser.parse_assignment_expression())?;
                    }
                } else {
                    return Err(self.error_expected(":"));
                }
            }
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.parse_closing(SyntaxKind::CloseBraceToken, &open)
    }
}
