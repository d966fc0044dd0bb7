//! `==` and `!=`: eqeqeq, eqnull and comparisons against falsy literals.

use super::RuleResult;
use hintr_common::diagnostic_codes;
use hintr_parser::{EventContext, EventKind, EventRegistry, ExprKind, RuleContext};

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::Operator, check_loose_equality);
}

/// Literals whose loose comparison coerces in surprising ways.
fn is_coercing_literal(text: &str) -> bool {
    matches!(
        text,
        "0" | "''" | "\"\"" | "undefined" | "true" | "false" | "null"
    )
}

fn check_loose_equality(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.expr != Some(ExprKind::Binary) {
        return Ok(());
    }
    let strict = match ctx.value.as_deref() {
        Some("==") => "===",
        Some("!=") => "!==",
        _ => return Ok(()),
    };
    let mut literals = ctx.operands.iter().flatten().map(String::as_str);
    let against_null = literals.clone().any(|text| text == "null");
    if against_null && rules.is_enabled("eqnull") {
        return Ok(());
    }

    let operator = ctx.value.as_deref().unwrap_or_default();
    if rules.is_enabled("eqeqeq") {
        rules.warn(diagnostic_codes::EXPECTED_AND_SAW, ctx, &[strict, operator]);
        return Ok(());
    }
    if let Some(literal) = literals.find(|text| is_coercing_literal(text)) {
        rules.warn(diagnostic_codes::USE_STRICT_COMPARISON, ctx, &[strict, literal]);
    }
    Ok(())
}
