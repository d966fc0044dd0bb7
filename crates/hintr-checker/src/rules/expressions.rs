//! Expression rules: eval, constructors, operators, `arguments` members,
//! native prototypes, assignments in conditions and line breaks.

use super::{RuleResult, raise_once};
use hintr_common::diagnostic_codes;
use hintr_parser::{EventContext, EventKind, EventRegistry, ExprKind, RuleContext};
use hintr_scanner::SyntaxKind;

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::Call, check_eval);
    registry.on(EventKind::New, check_constructor);
    registry.on(EventKind::ExpressionStatement, check_new_for_side_effects);
    registry.on(EventKind::Condition, check_assignment_in_condition);
    registry.on(EventKind::Operator, check_operator);
    registry.on(EventKind::Assignment, check_assignment_operator);
    registry.on(EventKind::Assignment, check_native_prototype);
    registry.on(EventKind::MemberAccess, check_arguments_member);
    registry.on(EventKind::LineBreak, check_line_break);
}

const BITWISE_OPERATORS: &[&str] = &["&", "|", "^", "~", "<<", ">>", ">>>"];
const BITWISE_ASSIGNMENTS: &[&str] = &["&=", "|=", "^=", "<<=", ">>=", ">>>="];

/// Constructors whose prototypes `freeze` protects.
const NATIVE_OBJECTS: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "Map",
    "Number",
    "Object",
    "Promise",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "Set",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "WeakMap",
    "WeakSet",
];

fn check_eval(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let direct = ctx.expr == Some(ExprKind::Identifier) && ctx.name.as_deref() == Some("eval");
    let via_global = matches!(
        ctx.operands[0].as_deref(),
        Some("window.eval" | "globalThis.eval")
    );
    if (direct || via_global) && !rules.is_enabled("evil") {
        rules.warn(diagnostic_codes::EVAL_IS_EVIL, ctx, &[]);
    }
    Ok(())
}

fn check_constructor(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let Some(path) = ctx.operands[0].as_deref() else {
        return Ok(());
    };
    match path {
        "Array" => {
            rules.warn(diagnostic_codes::ARRAY_CONSTRUCTOR, ctx, &[]);
        }
        "Object" => {
            rules.warn(diagnostic_codes::OBJECT_CONSTRUCTOR, ctx, &[]);
        }
        "Number" | "String" | "Boolean" | "Symbol" | "Math" | "JSON" => {
            rules.warn(diagnostic_codes::PRIMITIVE_CONSTRUCTOR, ctx, &[path]);
        }
        _ => {}
    }

    let short_name = path.rsplit('.').next().unwrap_or(path);
    let lowercase = short_name.starts_with(|c: char| c.is_lowercase());
    if lowercase && rules.is_enabled("newcap") {
        rules.warn(diagnostic_codes::CONSTRUCTOR_NAME_CASE, ctx, &[]);
    }
    Ok(())
}

fn check_new_for_side_effects(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.expr == Some(ExprKind::New) && rules.is_enabled("nonew") {
        rules.warn(diagnostic_codes::NEW_FOR_SIDE_EFFECTS, ctx, &[]);
    }
    Ok(())
}

/// An extra pair of parentheses marks the assignment as intended.
fn check_assignment_in_condition(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.expr == Some(ExprKind::Assignment) && !ctx.parenthesized && !rules.is_enabled("boss") {
        rules.warn(diagnostic_codes::ASSIGNMENT_IN_CONDITION, ctx, &[]);
    }
    Ok(())
}

fn check_operator(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let operator = ctx.value.as_deref().unwrap_or_default();
    let flagged = match ctx.expr {
        Some(ExprKind::Update) => rules.is_enabled("plusplus"),
        Some(ExprKind::Binary | ExprKind::Unary) => {
            BITWISE_OPERATORS.contains(&operator) && rules.is_enabled("bitwise")
        }
        _ => false,
    };
    if flagged {
        rules.warn(diagnostic_codes::UNEXPECTED_USE, ctx, &[operator]);
    }
    Ok(())
}

fn check_assignment_operator(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let operator = ctx.value.as_deref().unwrap_or_default();
    if BITWISE_ASSIGNMENTS.contains(&operator) && rules.is_enabled("bitwise") {
        rules.warn(diagnostic_codes::UNEXPECTED_USE, ctx, &[operator]);
    }
    Ok(())
}

/// `Array.prototype.x = ...` and friends.
fn check_native_prototype(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if !rules.is_enabled("freeze") {
        return Ok(());
    }
    let Some(path) = ctx.operands[0].as_deref() else {
        return Ok(());
    };
    let mut segments = path.split('.');
    let (Some(object), Some("prototype"), Some(_)) = (segments.next(), segments.next(), segments.next())
    else {
        return Ok(());
    };
    if NATIVE_OBJECTS.contains(&object) && rules.scopes().lookup(object).is_none() {
        rules.warn(diagnostic_codes::EXTENDS_NATIVE_PROTOTYPE, ctx, &[object]);
    }
    Ok(())
}

fn check_arguments_member(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.operands[0].as_deref() != Some("arguments") || !rules.is_enabled("noarg") {
        return Ok(());
    }
    if let Some(member @ ("callee" | "caller")) = ctx.name.as_deref() {
        rules.warn(diagnostic_codes::AVOID_ARGUMENTS_MEMBER, ctx, &[member]);
    }
    Ok(())
}

/// A comma or operator starting a line reads like the start of a new
/// statement. The matching hint is given once per unit.
fn check_line_break(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let (relaxing, hint) = if ctx.token == Some(SyntaxKind::CommaToken) {
        ("laxcomma", diagnostic_codes::LAXCOMMA_HINT)
    } else {
        ("laxbreak", diagnostic_codes::LAXBREAK_HINT)
    };
    if rules.is_enabled(relaxing) {
        return Ok(());
    }
    rules.raise(diagnostic_codes::MISLEADING_LINE_BREAK, ctx.pos, &ctx.substitutions);
    raise_once(rules, hint, ctx);
    Ok(())
}
