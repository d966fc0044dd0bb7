//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over the table in
//! `precedence`. Arrow functions are recognized with a look-ahead over a
//! scanner snapshot, which is rewound afterwards. Look-ahead results are
//! cached per `(` offset so nested groups are scanned once.

use super::precedence::{LOWEST, binary_precedence, is_logical, is_right_associative};
use super::state::ParserState;
use super::{ExprInfo, ParseResult};
use crate::events::{EventContext, EventKind, ExprKind};
use hintr_common::{BindingKind, Position, diagnostic_codes};
use hintr_scanner::{SyntaxKind, Token};
use smallvec::{SmallVec, smallvec};

/// A parsed property key. `token` is `None` for computed keys.
#[derive(Clone, Debug)]
pub(crate) struct PropertyKey {
    pub token: Option<Token>,
}

impl PropertyKey {
    pub fn is_plain_identifier(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.kind == SyntaxKind::Identifier)
    }
}

impl ParserState<'_> {
    /// Run `f` with the `in` operator allowed again (inside brackets,
    /// parentheses, bodies).
    pub(crate) fn with_in_allowed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.disallow_in, false);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    /// `LineBreak` event when the current operator or comma starts a line.
    pub(crate) fn fire_line_break(&mut self) -> ParseResult<()> {
        if !self.current.has_preceding_line_break() {
            return Ok(());
        }
        let ctx = EventContext::for_token(EventKind::LineBreak, &self.current)
            .with_substitutions(&[&self.current.text]);
        self.fire(ctx)
    }

    // =========================================================================
    // Comma, assignment, conditional
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> ParseResult<ExprInfo> {
        let first = self.parse_assignment_expression()?;
        if !self.is_token(SyntaxKind::CommaToken) {
            return Ok(first);
        }
        while self.is_token(SyntaxKind::CommaToken) {
            self.fire_line_break()?;
            self.next_token()?;
            self.parse_assignment_expression()?;
        }
        Ok(ExprInfo::new(ExprKind::Sequence, first.pos))
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<ExprInfo> {
        self.nested(|parser| parser.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> ParseResult<ExprInfo> {
        if self.is_start_of_arrow() {
            let is_async =
                self.is_contextual("async") && self.peek_kind() != SyntaxKind::EqualsGreaterThanToken;
            return self.parse_arrow_function(is_async);
        }
        if self.in_generator() && self.is_contextual("yield") {
            return self.parse_yield_expression();
        }

        let target = self.parse_conditional_expression()?;
        if !self.token().is_assignment_operator() {
            return Ok(target);
        }

        let op = self.current.clone();
        let plain = op.kind == SyntaxKind::EqualsToken;
        let valid = match target.kind {
            ExprKind::Identifier | ExprKind::Member => true,
            ExprKind::Array | ExprKind::Object => plain && !target.parenthesized,
            _ => false,
        };
        if !valid {
            self.raise(diagnostic_codes::BAD_ASSIGNMENT, op.pos, &[])?;
        }
        if let Some(name) = target.name.as_deref().filter(|_| target.is_identifier()) {
            self.write_name(name, target.pos, plain)?;
        }
        if plain && target.is_pattern() {
            for (name, pos) in &target.targets {
                self.write_name(name, *pos, true)?;
                let mut ctx = EventContext::new(EventKind::Assignment, *pos)
                    .with_value(op.text.clone())
                    .with_name(name.clone());
                ctx.token = Some(op.kind);
                ctx.expr = Some(ExprKind::Identifier);
                ctx.operands[0] = Some(name.clone());
                self.fire(ctx)?;
            }
        }

        let mut ctx = EventContext::new(EventKind::Assignment, target.pos).with_value(op.text.clone());
        ctx.token = Some(op.kind);
        ctx.name = target.name.clone();
        ctx.expr = Some(target.kind);
        ctx.parenthesized = target.parenthesized;
        ctx.operands[0] = target.path.clone();
        self.fire(ctx)?;

        self.next_token()?;
        self.parse_assignment_expression()?;
        let mut result = ExprInfo::new(ExprKind::Assignment, target.pos);
        result.name = target.name;
        Ok(result)
    }

    /// `name` is the target of an assignment. A plain `=` turns the read
    /// recorded for it into a write.
    pub(crate) fn write_name(&mut self, name: &str, pos: Position, plain: bool) -> ParseResult<()> {
        if plain {
            self.scopes.retract_use(name);
        }
        let is_const = self
            .scopes
            .lookup(name)
            .is_some_and(|binding| binding.kind == BindingKind::Const);
        if is_const {
            self.raise(diagnostic_codes::CONST_REASSIGNMENT, pos, &[name])?;
        }
        Ok(())
    }

    fn parse_yield_expression(&mut self) -> ParseResult<ExprInfo> {
        let pos = self.current.pos;
        self.next_token()?;
        let delegate = self.parse_optional(SyntaxKind::AsteriskToken)?;
        if delegate || !self.at_expression_end() {
            self.parse_assignment_expression()?;
        }
        Ok(ExprInfo::new(ExprKind::Yield, pos))
    }

    fn at_expression_end(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::TemplateMiddle
                | SyntaxKind::TemplateTail
                | SyntaxKind::EndOfFileToken
        ) || self.current.has_preceding_line_break()
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<ExprInfo> {
        let test = self.parse_binary_expression(LOWEST)?;
        if !self.is_token(SyntaxKind::QuestionToken) {
            return Ok(test);
        }
        self.add_complexity();
        self.fire_line_break()?;
        self.next_token()?;
        self.with_in_allowed(|parser| parser.parse_assignment_expression())?;
        if self.is_token(SyntaxKind::ColonToken) {
            self.fire_line_break()?;
        }
        self.parse_expected(SyntaxKind::ColonToken)?;
        self.parse_assignment_expression()?;
        Ok(ExprInfo::new(ExprKind::Conditional, test.pos))
    }

    // =========================================================================
    // Binary and unary operators
    // =========================================================================

    fn parse_binary_expression(&mut self, min_precedence: u8) -> ParseResult<ExprInfo> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let kind = self.token();
            let Some(precedence) = binary_precedence(kind) else {
                break;
            };
            if precedence < min_precedence || (kind == SyntaxKind::InKeyword && self.disallow_in) {
                break;
            }
            let op = self.current.clone();
            self.fire_line_break()?;
            self.next_token()?;
            if is_logical(kind) {
                self.add_complexity();
            }
            let next_min = if is_right_associative(kind) {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min)?;

            let expr_kind = if is_logical(kind) {
                ExprKind::Logical
            } else {
                ExprKind::Binary
            };
            let mut ctx = EventContext::for_token(EventKind::Operator, &op);
            ctx.expr = Some(expr_kind);
            ctx.operands = [left.literal.clone(), right.literal.clone()];
            self.fire(ctx)?;
            left = ExprInfo::new(expr_kind, left.pos);
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<ExprInfo> {
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let op = self.current.clone();
                self.next_token()?;
                if op.kind == SyntaxKind::TypeOfKeyword {
                    self.typeof_pending = true;
                }
                let operand = self.nested(|parser| parser.parse_unary_expression());
                self.typeof_pending = false;
                let operand = operand?;

                let kind = match op.kind {
                    SyntaxKind::DeleteKeyword => ExprKind::Delete,
                    SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => ExprKind::Update,
                    _ => ExprKind::Unary,
                };
                let mut ctx = EventContext::for_token(EventKind::Operator, &op);
                ctx.expr = Some(kind);
                ctx.operands[0] = operand.literal.or(operand.path);
                self.fire(ctx)?;
                Ok(ExprInfo::new(kind, op.pos))
            }
            SyntaxKind::Identifier if self.is_await_expression() => {
                let pos = self.current.pos;
                self.next_token()?;
                self.nested(|parser| parser.parse_unary_expression())?;
                Ok(ExprInfo::new(ExprKind::Await, pos))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// `await` inside an async function, or at the top level of a module
    /// when followed by an operand on the same line.
    fn is_await_expression(&mut self) -> bool {
        if !self.is_contextual("await") {
            return false;
        }
        if self.in_async() {
            return true;
        }
        if self.functions.len() > 1 {
            return false;
        }
        let next = self.peek_token();
        !next.has_preceding_line_break()
            && matches!(
                next.kind,
                SyntaxKind::Identifier
                    | SyntaxKind::ThisKeyword
                    | SyntaxKind::NewKeyword
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
            )
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<ExprInfo> {
        let expr = self.parse_left_hand_side_expression()?;
        let is_update = matches!(
            self.token(),
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        );
        if !is_update || self.current.has_preceding_line_break() {
            return Ok(expr);
        }
        let op = self.current.clone();
        self.next_token()?;
        let mut ctx = EventContext::for_token(EventKind::Operator, &op);
        ctx.expr = Some(ExprKind::Update);
        ctx.operands[0] = expr.path;
        self.fire(ctx)?;
        Ok(ExprInfo::new(ExprKind::Update, expr.pos))
    }

    // =========================================================================
    // Member access, calls, `new`
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<ExprInfo> {
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_call_tail(expr, true)
    }

    fn parse_call_tail(&mut self, mut expr: ExprInfo, allow_call: bool) -> ParseResult<ExprInfo> {
        loop {
            expr = match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    self.parse_member_name(expr)?
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token()?;
                    match self.token() {
                        SyntaxKind::OpenParenToken => self.parse_call(expr)?,
                        SyntaxKind::OpenBracketToken => self.parse_computed_member(expr)?,
                        _ => self.parse_member_name(expr)?,
                    }
                }
                SyntaxKind::OpenBracketToken => self.parse_computed_member(expr)?,
                SyntaxKind::OpenParenToken if allow_call => self.parse_call(expr)?,
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    self.parse_template()?;
                    ExprInfo::new(ExprKind::Call, expr.pos)
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    fn parse_member_name(&mut self, object: ExprInfo) -> ParseResult<ExprInfo> {
        let token = self.current.clone();
        let acceptable = matches!(
            token.kind,
            SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier
        ) || token.kind.is_keyword();
        if !acceptable {
            return Err(self.error_expected("(identifier)"));
        }
        self.next_token()?;
        self.fire_property_name(&token)?;

        let name = token.name().to_string();
        let mut ctx = EventContext::for_token(EventKind::MemberAccess, &token);
        ctx.is_property = true;
        ctx.value = object.path.clone();
        ctx.operands[0] = object.path.clone();
        self.fire(ctx)?;

        let mut info = ExprInfo::new(ExprKind::Member, object.pos);
        info.path = object.path.map(|path| format!("{path}.{name}"));
        info.name = Some(name);
        Ok(info)
    }

    fn parse_computed_member(&mut self, object: ExprInfo) -> ParseResult<ExprInfo> {
        let open = self.current.clone();
        self.next_token()?;
        let index = self.with_in_allowed(|parser| parser.parse_expression())?;
        self.parse_closing(SyntaxKind::CloseBracketToken, &open)?;

        let key = index
            .literal
            .as_deref()
            .filter(|_| index.is_string)
            .and_then(|text| text.get(1..text.len().saturating_sub(1)))
            .map(str::to_string);
        let mut ctx = EventContext::new(EventKind::MemberAccess, open.pos).with_code("computed");
        ctx.token = Some(SyntaxKind::OpenBracketToken);
        ctx.name = key.clone();
        ctx.value = object.path.clone();
        ctx.operands[0] = object.path;
        ctx.operands[1] = index.literal;
        self.fire(ctx)?;

        let mut info = ExprInfo::new(ExprKind::Member, object.pos);
        info.name = key;
        Ok(info)
    }

    fn parse_call(&mut self, callee: ExprInfo) -> ParseResult<ExprInfo> {
        let (count, first) = self.parse_arguments()?;
        let mut ctx = EventContext::new(EventKind::Call, callee.pos);
        ctx.token = Some(SyntaxKind::OpenParenToken);
        ctx.name = callee.name;
        ctx.expr = Some(callee.kind);
        ctx.operands[0] = callee.path;
        if let Some(first) = first {
            ctx.value = first.is_string.then(|| "string".to_string());
            ctx.operands[1] = first.literal;
        }
        ctx.depth = count;
        self.fire(ctx)?;
        Ok(ExprInfo::new(ExprKind::Call, callee.pos))
    }

    /// `( args )`. Returns the argument count and the first argument.
    fn parse_arguments(&mut self) -> ParseResult<(u32, Option<ExprInfo>)> {
        let open = self.current.clone();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let (count, first) = self.with_in_allowed(|parser| {
            let mut count = 0;
            let mut first = None;
            while !parser.is_token(SyntaxKind::CloseParenToken) {
                parser.parse_optional(SyntaxKind::DotDotDotToken)?;
                let arg = parser.parse_assignment_expression()?;
                if count == 0 {
                    first = Some(arg);
                }
                count += 1;
                if !parser.is_token(SyntaxKind::CommaToken) {
                    break;
                }
                parser.fire_line_break()?;
                parser.next_token()?;
            }
            Ok((count, first))
        })?;
        self.parse_closing(SyntaxKind::CloseParenToken, &open)?;
        Ok((count, first))
    }

    fn parse_new_expression(&mut self) -> ParseResult<ExprInfo> {
        let new_token = self.current.clone();
        self.next_token()?;
        if self.is_token(SyntaxKind::DotToken) {
            self.next_token()?;
            if !(self.is_token(SyntaxKind::Identifier) && self.current.name() == "target") {
                return Err(self.error_expected("target"));
            }
            self.next_token()?;
            return Ok(ExprInfo::new(ExprKind::MetaProperty, new_token.pos));
        }

        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.nested(|parser| parser.parse_new_expression())?
        } else {
            self.parse_primary_expression()?
        };
        let callee = self.parse_call_tail(callee, false)?;
        let mut args = 0;
        if self.is_token(SyntaxKind::OpenParenToken) {
            args = self.parse_arguments()?.0;
        }

        let mut ctx = EventContext::new(EventKind::New, new_token.pos);
        ctx.token = Some(SyntaxKind::NewKeyword);
        ctx.name = callee.name;
        ctx.expr = Some(callee.kind);
        ctx.operands[0] = callee.path;
        ctx.depth = args;
        self.fire(ctx)?;
        Ok(ExprInfo::new(ExprKind::New, new_token.pos))
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<ExprInfo> {
        let in_typeof = std::mem::take(&mut self.typeof_pending);
        let token = self.current.clone();
        match token.kind {
            SyntaxKind::Identifier => {
                if self.is_async_function_start() {
                    self.next_token()?;
                    return self.parse_function_expression(true);
                }
                self.next_token()?;
                self.use_identifier(&token, in_typeof)?;
                let name = token.name().to_string();
                let mut info = ExprInfo::new(ExprKind::Identifier, token.pos);
                if name == "undefined" {
                    info.literal = Some(name.clone());
                }
                info.path = Some(name.clone());
                info.name = Some(name);
                Ok(info)
            }
            SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                self.next_token()?;
                let kind = if token.kind == SyntaxKind::ThisKeyword {
                    ExprKind::This
                } else {
                    ExprKind::Super
                };
                let mut info = ExprInfo::new(kind, token.pos);
                info.path = Some(token.text);
                Ok(info)
            }
            SyntaxKind::NullKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.next_token()?;
                let mut info = ExprInfo::new(ExprKind::Literal, token.pos);
                info.literal = Some(token.text);
                Ok(info)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral | SyntaxKind::RegularExpressionLiteral => {
                let event = match token.kind {
                    SyntaxKind::NumericLiteral => EventKind::Number,
                    SyntaxKind::StringLiteral => EventKind::String,
                    _ => EventKind::RegExp,
                };
                self.fire(EventContext::for_token(event, &token))?;
                self.next_token()?;
                let mut info = ExprInfo::new(ExprKind::Literal, token.pos);
                info.is_string = token.kind == SyntaxKind::StringLiteral;
                info.literal = Some(token.text);
                Ok(info)
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => self.parse_template(),
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                // `typeof (x)` and `typeof ((x))` still guard the reference.
                if in_typeof
                    && (self.is_token(SyntaxKind::OpenParenToken)
                        || (self.is_token(SyntaxKind::Identifier)
                            && self.peek_kind() == SyntaxKind::CloseParenToken))
                {
                    self.typeof_pending = true;
                }
                let mut inner = self.with_in_allowed(|parser| parser.parse_expression())?;
                self.parse_closing(SyntaxKind::CloseParenToken, &token)?;
                inner.parenthesized = true;
                Ok(inner)
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(false),
            SyntaxKind::ClassKeyword => self.parse_class(false),
            SyntaxKind::ImportKeyword => {
                self.next_token()?;
                if self.parse_optional(SyntaxKind::DotToken)? {
                    if !(self.is_token(SyntaxKind::Identifier) && self.current.name() == "meta") {
                        return Err(self.error_expected("meta"));
                    }
                    self.next_token()?;
                    return Ok(ExprInfo::new(ExprKind::MetaProperty, token.pos));
                }
                self.parse_arguments()?;
                Ok(ExprInfo::new(ExprKind::Call, token.pos))
            }
            SyntaxKind::PrivateIdentifier => {
                self.next_token()?;
                Ok(ExprInfo::new(ExprKind::Literal, token.pos))
            }
            _ => Err(self.error_unexpected()),
        }
    }

    fn parse_array_literal(&mut self) -> ParseResult<ExprInfo> {
        let open = self.current.clone();
        self.next_token()?;
        let targets = self.with_in_allowed(|parser| {
            let mut targets = Vec::new();
            while !parser.is_token(SyntaxKind::CloseBracketToken) {
                if parser.is_token(SyntaxKind::CommaToken) {
                    parser.fire_line_break()?;
                    parser.next_token()?;
                    continue;
                }
                parser.parse_optional(SyntaxKind::DotDotDotToken)?;
                parser.parse_assignment_expression()?.collect_targets(&mut targets);
                if !parser.is_token(SyntaxKind::CommaToken) {
                    break;
                }
                parser.fire_line_break()?;
                parser.next_token()?;
            }
            Ok(targets)
        })?;
        self.parse_closing(SyntaxKind::CloseBracketToken, &open)?;
        let mut info = ExprInfo::new(ExprKind::Array, open.pos);
        info.targets = targets;
        Ok(info)
    }

    fn parse_object_literal(&mut self) -> ParseResult<ExprInfo> {
        let open = self.current.clone();
        self.next_token()?;
        let targets = self.with_in_allowed(|parser| {
            let mut targets = Vec::new();
            while !parser.is_token(SyntaxKind::CloseBraceToken) {
                parser.parse_object_member(&mut targets)?;
                if !parser.is_token(SyntaxKind::CommaToken) {
                    break;
                }
                parser.fire_line_break()?;
                parser.next_token()?;
            }
            Ok(targets)
        })?;
        self.parse_closing(SyntaxKind::CloseBraceToken, &open)?;
        let mut info = ExprInfo::new(ExprKind::Object, open.pos);
        info.targets = targets;
        Ok(info)
    }

    fn parse_object_member(&mut self, targets: &mut Vec<(String, Position)>) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::DotDotDotToken)? {
            self.parse_assignment_expression()?.collect_targets(targets);
            return Ok(());
        }
        if self.parse_optional(SyntaxKind::AsteriskToken)? {
            let key = self.parse_property_key()?;
            self.fire_property_key(&key)?;
            return self.parse_method(&key, false, true, false);
        }
        let modifier = self.is_contextual("get") || self.is_contextual("set") || self.is_contextual("async");
        if modifier && self.is_method_modifier() {
            let is_async = self.is_contextual("async");
            self.next_token()?;
            let is_generator = is_async && self.parse_optional(SyntaxKind::AsteriskToken)?;
            let key = self.parse_property_key()?;
            self.fire_property_key(&key)?;
            return self.parse_method(&key, is_async, is_generator, false);
        }

        let key = self.parse_property_key()?;
        match self.token() {
            SyntaxKind::ColonToken => {
                self.fire_property_key(&key)?;
                self.next_token()?;
                self.parse_assignment_expression()?.collect_targets(targets);
            }
            SyntaxKind::OpenParenToken => {
                self.fire_property_key(&key)?;
                self.parse_method(&key, false, false, false)?;
            }
            _ => {
                // Shorthand `{ a }`, or `{ a = 1 }` in a destructuring target.
                let Some(token) = key.token.filter(|t| t.kind == SyntaxKind::Identifier) else {
                    return Err(self.error_expected(":"));
                };
                self.use_identifier(&token, false)?;
                targets.push((token.name().to_string(), token.pos));
                if self.parse_optional(SyntaxKind::EqualsToken)? {
                    self.parse_assignment_expression()?;
                }
            }
        }
        Ok(())
    }

    /// `get`/`set`/`async` used as a modifier rather than as a key.
    pub(crate) fn is_method_modifier(&mut self) -> bool {
        let is_async = self.is_contextual("async");
        let next = self.peek_token();
        let ends_key = matches!(
            next.kind,
            SyntaxKind::ColonToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::CommaToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EndOfFileToken
        );
        !ends_key && !(is_async && next.has_preceding_line_break())
    }

    pub(crate) fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        let token = self.current.clone();
        match token.kind {
            SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral => {
                self.next_token()?;
                Ok(PropertyKey { token: Some(token) })
            }
            kind if kind.is_keyword() => {
                self.next_token()?;
                Ok(PropertyKey { token: Some(token) })
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                self.with_in_allowed(|parser| parser.parse_assignment_expression())?;
                self.parse_closing(SyntaxKind::CloseBracketToken, &token)?;
                Ok(PropertyKey { token: None })
            }
            _ => Err(self.error_expected("(identifier)")),
        }
    }

    pub(crate) fn fire_property_key(&mut self, key: &PropertyKey) -> ParseResult<()> {
        let Some(token) = &key.token else {
            return Ok(());
        };
        match token.kind {
            SyntaxKind::StringLiteral => self.fire(EventContext::for_token(EventKind::String, token)),
            SyntaxKind::NumericLiteral => self.fire(EventContext::for_token(EventKind::Number, token)),
            _ => self.fire_property_name(token),
        }
    }

    // =========================================================================
    // Templates
    // =========================================================================

    pub(crate) fn parse_template(&mut self) -> ParseResult<ExprInfo> {
        let start = self.current.clone();
        self.fire(EventContext::for_token(EventKind::Template, &start))?;
        self.next_token()?;
        if start.kind == SyntaxKind::NoSubstitutionTemplateLiteral {
            return Ok(ExprInfo::new(ExprKind::Template, start.pos));
        }
        loop {
            self.with_in_allowed(|parser| parser.parse_expression())?;
            let part = self.current.clone();
            match part.kind {
                SyntaxKind::TemplateMiddle => {
                    self.fire(EventContext::for_token(EventKind::Template, &part))?;
                    self.next_token()?;
                }
                SyntaxKind::TemplateTail => {
                    self.fire(EventContext::for_token(EventKind::Template, &part))?;
                    self.next_token()?;
                    break;
                }
                _ => return Err(self.error_expected("}")),
            }
        }
        Ok(ExprInfo::new(ExprKind::Template, start.pos))
    }

    // =========================================================================
    // Arrow function look-ahead
    // =========================================================================

    /// Whether the tokens at the cursor start an arrow function.
    pub(crate) fn is_start_of_arrow(&mut self) -> bool {
        match self.token() {
            SyntaxKind::Identifier if self.is_contextual("async") => {
                let snapshot = self.scanner.save_state();
                let next = self.scan_raw();
                let result = !next.has_preceding_line_break()
                    && match next.kind {
                        SyntaxKind::EqualsGreaterThanToken => true,
                        SyntaxKind::Identifier => {
                            self.scan_raw().kind == SyntaxKind::EqualsGreaterThanToken
                        }
                        SyntaxKind::OpenParenToken => self.arrow_follows_parens(next.pos.offset),
                        _ => false,
                    };
                self.scanner.restore_state(snapshot);
                result
            }
            SyntaxKind::Identifier => self.peek_kind() == SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::OpenParenToken => {
                let open = self.current.pos.offset;
                if let Some(&known) = self.arrow_parens.get(&open) {
                    return known;
                }
                let snapshot = self.scanner.save_state();
                let result = self.arrow_follows_parens(open);
                self.scanner.restore_state(snapshot);
                result
            }
            _ => false,
        }
    }

    /// With the scanner just past the `(` at `open`, skip to its matching `)`
    /// and report whether `=>` comes next. Every parenthesis closed on the
    /// way is decided and remembered too, so nested groups are never
    /// rescanned. The caller rewinds the scanner.
    fn arrow_follows_parens(&mut self, open: u32) -> bool {
        if let Some(&known) = self.arrow_parens.get(&open) {
            return known;
        }
        // `Some(offset)` for parentheses, `None` for other brackets.
        let mut openers: SmallVec<[Option<u32>; 16]> = smallvec![Some(open)];
        let mut closed: Option<u32> = None;
        loop {
            let token = self.scan_raw();
            if let Some(paren) = closed.take() {
                let arrow = token.kind == SyntaxKind::EqualsGreaterThanToken;
                self.arrow_parens.insert(paren, arrow);
                if paren == open {
                    return arrow;
                }
            }
            match token.kind {
                SyntaxKind::OpenParenToken => openers.push(Some(token.pos.offset)),
                SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::TemplateHead => openers.push(None),
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::TemplateTail => match openers.pop() {
                    Some(Some(paren)) if token.kind == SyntaxKind::CloseParenToken => {
                        closed = Some(paren);
                    }
                    Some(Some(paren)) => {
                        self.arrow_parens.insert(paren, false);
                        if paren == open {
                            return false;
                        }
                    }
                    Some(None) => {}
                    None => return false,
                },
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
        }
    }
}
