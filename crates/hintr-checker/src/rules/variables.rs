//! Binding rules: unused, undef, shadow, latedef, read-only globals and
//! strict-mode reserved words.

use super::RuleResult;
use hintr_common::{BindingKind, OptionValue, diagnostic_codes};
use hintr_parser::{EventContext, EventKind, EventRegistry, ExprKind, Redeclaration, RuleContext};
use hintr_scanner::TokenFlags;

pub(super) fn register(registry: &mut EventRegistry) {
    registry.on(EventKind::Declaration, check_declaration);
    registry.on(EventKind::UnusedBinding, check_unused);
    registry.on(EventKind::ImpliedGlobal, check_undefined);
    registry.on(EventKind::UsedBeforeDefinition, check_late_definition);
    registry.on(EventKind::Assignment, check_read_only_global);
}

/// How far the `unused` option reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UnusedPolicy {
    Off,
    /// Variables and trailing unused parameters.
    LastParam,
    /// Variables only.
    Vars,
    /// Every binding, parameters included.
    Strict,
}

impl UnusedPolicy {
    fn from_option(value: Option<&OptionValue>) -> Self {
        match value {
            Some(OptionValue::String(policy)) => match policy.as_str() {
                "vars" => UnusedPolicy::Vars,
                "strict" => UnusedPolicy::Strict,
                _ => UnusedPolicy::LastParam,
            },
            Some(value) if value.is_enabled() => UnusedPolicy::LastParam,
            _ => UnusedPolicy::Off,
        }
    }
}

/// How far the `shadow` option forbids redeclaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShadowPolicy {
    /// Same-frame redeclarations only (`false` or `"inner"`).
    Inner,
    /// Also names already bound in an enclosing frame.
    Outer,
    /// Shadowing allowed (`true`).
    Allowed,
}

impl ShadowPolicy {
    fn from_option(value: Option<&OptionValue>) -> Self {
        match value {
            Some(OptionValue::Bool(true)) => ShadowPolicy::Allowed,
            Some(OptionValue::String(policy)) if policy == "outer" => ShadowPolicy::Outer,
            _ => ShadowPolicy::Inner,
        }
    }
}

fn check_declaration(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let name = ctx.name.as_deref().unwrap_or_default();

    if rules.is_strict() && ctx.token_flags.contains(TokenFlags::STRICT_RESERVED) {
        rules.warn(diagnostic_codes::RESERVED_WORD, ctx, &[name]);
    }

    let policy = ShadowPolicy::from_option(rules.options().get("shadow"));
    match ctx.redeclares {
        Some(Redeclaration::SameFrame(_)) if policy != ShadowPolicy::Allowed => {
            rules.warn(diagnostic_codes::ALREADY_DEFINED, ctx, &[name]);
        }
        Some(Redeclaration::OuterFrame(_)) if policy == ShadowPolicy::Outer => {
            rules.warn(diagnostic_codes::SHADOWS_OUTER, ctx, &[name]);
        }
        None if policy != ShadowPolicy::Allowed
            && rules.scopes().is_global()
            && rules.globals().contains(name) =>
        {
            rules.warn(diagnostic_codes::REDEFINITION, ctx, &[name]);
        }
        _ => {}
    }
    Ok(())
}

fn check_unused(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let policy = UnusedPolicy::from_option(rules.options().get("unused"));
    let report = match (policy, ctx.binding) {
        (UnusedPolicy::Off, _) | (_, None) => false,
        (UnusedPolicy::Strict, Some(_)) => true,
        (_, Some(BindingKind::Catch)) => false,
        (UnusedPolicy::Vars, Some(BindingKind::Param)) => false,
        (UnusedPolicy::LastParam, Some(BindingKind::Param)) => ctx.last_param,
        (_, Some(_)) => true,
    };
    if report {
        let name = ctx.name.as_deref().unwrap_or_default();
        rules.warn(diagnostic_codes::UNUSED, ctx, &[name]);
    }
    Ok(())
}

/// Fired with the options in force where the name was used.
fn check_undefined(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if rules.is_enabled("undef") {
        let name = ctx.name.as_deref().unwrap_or_default();
        rules.warn(diagnostic_codes::NOT_DEFINED, ctx, &[name]);
    }
    Ok(())
}

/// Lexical bindings are always reported: reading them early throws. Hoisted
/// ones depend on `latedef`.
fn check_late_definition(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    let report = match ctx.binding {
        Some(BindingKind::Let | BindingKind::Const | BindingKind::Class) => true,
        Some(BindingKind::Function) => {
            rules.is_enabled("latedef") && rules.options().policy("latedef") != Some("nofunc")
        }
        Some(_) => rules.is_enabled("latedef"),
        None => false,
    };
    if report {
        let name = ctx.name.as_deref().unwrap_or_default();
        rules.warn(diagnostic_codes::USED_BEFORE_DEFINED, ctx, &[name]);
    }
    Ok(())
}

fn check_read_only_global(ctx: &EventContext, rules: &mut RuleContext<'_>) -> RuleResult {
    if ctx.expr != Some(ExprKind::Identifier) {
        return Ok(());
    }
    let Some(name) = ctx.name.as_deref() else {
        return Ok(());
    };
    if rules.scopes().lookup(name).is_none() && rules.globals().get(name) == Some(false) {
        rules.warn(diagnostic_codes::READ_ONLY, ctx, &[]);
    }
    Ok(())
}
