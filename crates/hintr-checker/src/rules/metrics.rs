//! Size limits: line length, parameters, statements, nesting depth and
//! cyclomatic complexity.

use super::RuleResult;
use hintr_common::diagnostic_codes;
use hintr_parser::{EventContext, EventKind, EventRegistry, RuleContext};

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::Line, check_line_length);
    registry.on(EventKind::Block, check_depth);
    registry.on(EventKind::FunctionExit, check_function_size);
}

/// The limit set for `option`, if any. Negative limits are ignored.
fn limit(rules: &RuleContext<'_>, option: &str) -> Option<u32> {
    rules
        .options()
        .number(option)
        .and_then(|value| u32::try_from(value).ok())
}

fn check_line_length(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let Some(max) = limit(rules, "maxlen") else {
        return Ok(());
    };
    let length = ctx.value.as_deref().map_or(0, |line| line.chars().count());
    if length > max as usize {
        rules.warn(diagnostic_codes::LINE_TOO_LONG, ctx, &[]);
    }
    Ok(())
}

fn check_depth(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if !ctx.braced {
        return Ok(());
    }
    match limit(rules, "maxdepth") {
        Some(max) if ctx.depth > max => {
            rules.warn(diagnostic_codes::NESTED_TOO_DEEPLY, ctx, &[&ctx.depth.to_string()]);
        }
        _ => {}
    }
    Ok(())
}

fn check_function_size(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let Some(metrics) = ctx.metrics else {
        return Ok(());
    };
    let checks = [
        ("maxparams", metrics.parameters, diagnostic_codes::TOO_MANY_PARAMETERS),
        ("maxstatements", metrics.statements, diagnostic_codes::TOO_MANY_STATEMENTS),
        ("maxcomplexity", metrics.complexity, diagnostic_codes::COMPLEXITY_TOO_HIGH),
    ];
    for (option, actual, code) in checks {
        if limit(rules, option).is_some_and(|max| actual > max) {
            rules.warn(code, ctx, &[&actual.to_string()]);
        }
    }
    Ok(())
}
