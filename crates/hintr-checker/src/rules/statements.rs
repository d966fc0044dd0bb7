//! Statement-level rules: braces, semicolons, dead code, `with`,
//! `debugger`, `for in` filtering and the `"use strict"` requirement.

use super::RuleResult;
use hintr_common::{OptionValue, diagnostic_codes};
use hintr_parser::{EventContext, EventKind, EventRegistry, ExprKind, RuleContext, StatementKind};
use hintr_scanner::SyntaxKind;

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::Statement, check_statement);
    registry.on(EventKind::Block, check_block);
    registry.on(EventKind::EmptyStatement, check_empty_statement);
    registry.on(EventKind::ExpressionStatement, check_expression_statement);
    registry.on(EventKind::MissingSemicolon, check_missing_semicolon);
    registry.on(EventKind::Unreachable, check_unreachable);
    registry.on(EventKind::Fallthrough, check_fallthrough);
    registry.on(EventKind::FunctionEnter, check_function_in_loop);
    registry.on(EventKind::FunctionExit, check_function_strictness);
}

/// Position of the last unbraced control body, so that its `;` is not
/// reported as an unnecessary semicolon.
const UNBRACED_BODY: &str = "statements.unbraced_body";
const GLOBAL_STRICT_CHECKED: &str = "statements.global_strict_checked";

fn check_statement(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    match ctx.statement {
        Some(StatementKind::With) if !rules.is_enabled("withstmt") => {
            rules.warn(diagnostic_codes::WITH_STATEMENT, ctx, &[]);
        }
        Some(StatementKind::Debugger) if !rules.is_enabled("debug") => {
            rules.warn(diagnostic_codes::DEBUGGER_STATEMENT, ctx, &[]);
        }
        Some(StatementKind::ForIn) if rules.is_enabled("forin") => {
            if ctx.body.is_some_and(|body| body != StatementKind::If) {
                rules.warn(diagnostic_codes::UNFILTERED_FOR_IN, ctx, &[]);
            }
        }
        _ => {}
    }
    check_global_strictness(ctx, rules);
    Ok(())
}

/// `strict: "global"` asks for a program-level `"use strict"`; the first
/// statement of the program tells whether it was there.
fn check_global_strictness(ctx: &EventContext, rules: &mut RuleContext<'_>) {
    if rules.options().policy("strict") != Some("global") || !rules.scopes().is_global() {
        return;
    }
    if rules.recall(GLOBAL_STRICT_CHECKED).is_some() {
        return;
    }
    rules.remember(GLOBAL_STRICT_CHECKED, "yes");
    if !rules.is_strict() {
        rules.warn(diagnostic_codes::MISSING_USE_STRICT, ctx, &[]);
    }
}

fn check_block(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.braced {
        return Ok(());
    }
    rules.remember(UNBRACED_BODY, position_key(ctx));
    let owner = ctx.name.as_deref().unwrap_or_default();
    if !matches!(owner, "if" | "else" | "for" | "while" | "do") || !rules.is_enabled("curly") {
        return Ok(());
    }
    let saw = ctx.value.as_deref().unwrap_or_default();
    rules.warn(diagnostic_codes::EXPECTED_AND_SAW, ctx, &["{", saw]);
    Ok(())
}

fn check_empty_statement(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if rules.recall(UNBRACED_BODY) == Some(position_key(ctx).as_str()) {
        return Ok(());
    }
    rules.warn(diagnostic_codes::UNNECESSARY_SEMICOLON, ctx, &[]);
    Ok(())
}

fn position_key(ctx: &EventContext) -> String {
    format!("{}:{}", ctx.pos.line, ctx.pos.character)
}

fn check_expression_statement(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let Some(kind) = ctx.expr else {
        return Ok(());
    };
    let has_effect = matches!(
        kind,
        ExprKind::Assignment
            | ExprKind::Call
            | ExprKind::New
            | ExprKind::Update
            | ExprKind::Delete
            | ExprKind::Await
            | ExprKind::Yield
    );
    if !has_effect && !rules.is_enabled("expr") {
        rules.warn(diagnostic_codes::EXPRESSION_STATEMENT, ctx, &[]);
    }
    Ok(())
}

fn check_missing_semicolon(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if rules.is_enabled("asi") {
        return Ok(());
    }
    let closes_one_liner =
        ctx.token == Some(SyntaxKind::CloseBraceToken) && ctx.start_line == ctx.pos.line;
    if closes_one_liner && rules.is_enabled("lastsemic") {
        return Ok(());
    }
    rules.warn(diagnostic_codes::MISSING_SEMICOLON, ctx, &[]);
    Ok(())
}

fn check_unreachable(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    rules.raise(diagnostic_codes::UNREACHABLE, ctx.pos, &ctx.substitutions);
    Ok(())
}

fn check_fallthrough(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    rules.raise(diagnostic_codes::FALLS_THROUGH, ctx.pos, &ctx.substitutions);
    Ok(())
}

fn check_function_in_loop(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.in_loop && !rules.is_enabled("loopfunc") {
        rules.warn(diagnostic_codes::FUNCTION_IN_LOOP, ctx, &[]);
    }
    Ok(())
}

/// `strict: true` wants every function to run in strict mode, through its
/// own directive or an enclosing one.
fn check_function_strictness(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let wants_strict = matches!(
        rules.options().get("strict"),
        Some(OptionValue::Bool(true))
    );
    if wants_strict && !rules.scopes().function_is_strict() {
        rules.warn(diagnostic_codes::MISSING_USE_STRICT, ctx, &[]);
    }
    Ok(())
}
