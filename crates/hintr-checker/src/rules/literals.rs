//! Literal rules: quote style, multi-line strings, decimal points and
//! octal forms in strict mode.

use super::RuleResult;
use hintr_common::diagnostic_codes;
use hintr_parser::{EventContext, EventKind, EventRegistry, RuleContext};
use hintr_scanner::TokenFlags;

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::String, check_quotes);
    registry.on(EventKind::String, check_string_escapes);
    registry.on(EventKind::Number, check_number);
}

/// First quote character seen in the unit, for `quotmark: true`.
const FIRST_QUOTE: &str = "literals.first_quote";

fn check_quotes(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let Some(quote) = ctx.quote else {
        return Ok(());
    };
    let required = match rules.options().policy("quotmark") {
        Some("single") => Some(('\'', "single")),
        Some("double") => Some(('"', "double")),
        Some(_) => return Ok(()),
        None => None,
    };
    if let Some((wanted, style)) = required {
        if quote != wanted {
            rules.warn(diagnostic_codes::WRONG_QUOTES, ctx, &[style]);
        }
        return Ok(());
    }
    if !rules.is_enabled("quotmark") {
        return Ok(());
    }
    match rules.recall(FIRST_QUOTE).and_then(|first| first.chars().next()) {
        Some(first) if first != quote => {
            rules.warn(diagnostic_codes::MIXED_QUOTES, ctx, &[]);
        }
        Some(_) => {}
        None => {
            rules.remember(FIRST_QUOTE, quote.to_string());
        }
    }
    Ok(())
}

fn check_string_escapes(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.token_flags.contains(TokenFlags::MULTILINE) && !rules.is_enabled("multistr") {
        rules.warn(diagnostic_codes::BAD_EOL_ESCAPE, ctx, &[]);
    }
    if ctx.token_flags.contains(TokenFlags::OCTAL_ESCAPE) && rules.is_strict() {
        rules.warn(diagnostic_codes::OCTAL_IN_STRICT_MODE, ctx, &[]);
    }
    Ok(())
}

fn check_number(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let text = ctx.value.as_deref().unwrap_or_default();
    if ctx.token_flags.contains(TokenFlags::LEADING_DECIMAL) {
        rules.warn(diagnostic_codes::LEADING_DECIMAL, ctx, &[text]);
    }
    if ctx.token_flags.contains(TokenFlags::TRAILING_DECIMAL) {
        rules.warn(diagnostic_codes::TRAILING_DECIMAL, ctx, &[text]);
    }
    if ctx.token_flags.contains(TokenFlags::LEGACY_OCTAL) && rules.is_strict() {
        rules.warn(diagnostic_codes::OCTAL_IN_STRICT_MODE, ctx, &[]);
    }
    Ok(())
}
