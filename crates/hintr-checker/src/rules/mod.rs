//! The default rule catalog.
//!
//! Every rule is a plain function registered as a listener for one event
//! kind. A rule reads the options in force through its `RuleContext`, so a
//! directive comment inside a function changes the rule's behavior there
//! and nowhere else. Rules never fail on user code; the `RuleFault` return
//! is kept for listeners that need to report an internal problem.

use hintr_parser::{EventContext, EventRegistry, RuleContext, RuleFault};

mod comparison;
mod expressions;
mod literals;
mod metrics;
mod statements;
mod variables;

pub(crate) type RuleResult = Result<(), RuleFault>;

/// Register the bundled rules. Registration order is report order for
/// diagnostics raised by the same event.
pub fn register_default_rules(registry: &mut EventRegistry) {
    comparison::register(registry);
    statements::register(registry);
    variables::register(registry);
    expressions::register(registry);
    literals::register(registry);
    metrics::register(registry);
}

/// Raise `code` once per unit, keyed by the code itself.
pub(crate) fn raise_once(rules: &mut RuleContext<'_>, code: &'static str, ctx: &EventContext) {
    if rules.recall(code).is_some() {
        return;
    }
    rules.remember(code, "raised");
    rules.warn(code, ctx, &[]);
}
