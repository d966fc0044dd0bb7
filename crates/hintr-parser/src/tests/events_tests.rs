use crate::events::{EventContext, EventKind, EventRegistry, RuleContext, UnitState};
use crate::fault::RuleFault;
use crate::options::OptionSet;
use crate::scope::{KnownGlobals, ScopeStack};
use crate::sink::DiagnosticSink;
use hintr_common::{OptionValue, Position};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Fixture {
    options: OptionSet,
    scopes: ScopeStack,
    globals: KnownGlobals,
    sink: DiagnosticSink,
    state: UnitState,
}

impl Fixture {
    fn new(options: OptionSet) -> Self {
        Fixture {
            options,
            scopes: ScopeStack::new(),
            globals: KnownGlobals::new(),
            sink: DiagnosticSink::new(50),
            state: UnitState::default(),
        }
    }

    fn run(&mut self, registry: &EventRegistry, ctx: &EventContext) -> Result<(), RuleFault> {
        let mut rules = RuleContext::new(
            registry,
            &self.options,
            &self.scopes,
            &self.globals,
            &mut self.sink,
            &mut self.state,
        );
        registry.dispatch(ctx, &mut rules)
    }
}

fn event(kind: EventKind) -> EventContext {
    EventContext::new(kind, Position::new(3, 5, 20, 5))
}

#[test]
fn test_listeners_run_in_registration_order() {
    let order = Arc::new(AtomicUsize::new(0));
    let mut registry = EventRegistry::new();
    for expected in 0..3 {
        let order = Arc::clone(&order);
        registry.on(EventKind::Call, move |_, _| {
            let seen = order.fetch_add(1, Ordering::SeqCst);
            if seen == expected {
                Ok(())
            } else {
                Err(RuleFault::new(format!("listener {expected} ran at {seen}")))
            }
        });
    }
    assert!(registry.has_listeners(EventKind::Call));
    assert!(!registry.has_listeners(EventKind::New));
    assert_eq!(registry.listener_count(), 3);

    let mut fixture = Fixture::new(OptionSet::new());
    assert_eq!(fixture.run(&registry, &event(EventKind::Call)), Ok(()));
    assert_eq!(order.load(Ordering::SeqCst), 3);

    // Events without listeners are a no-op.
    assert_eq!(fixture.run(&registry, &event(EventKind::New)), Ok(()));
}

#[test]
fn test_dispatch_stops_at_first_fault() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Line, |_, _| Err(RuleFault::new("broken rule")));
    let counter = Arc::clone(&calls);
    registry.on(EventKind::Line, move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let mut fixture = Fixture::new(OptionSet::new());
    let result = fixture.run(&registry, &event(EventKind::Line));
    assert_eq!(result, Err(RuleFault::new("broken rule")));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_warn_respects_code_switch() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Identifier, |ctx, rules| {
        rules.warn("W117", ctx, &["x"]);
        rules.warn("W098", ctx, &["y"]);
        Ok(())
    });
    let options: OptionSet = [("-W098".to_string(), OptionValue::Bool(true))]
        .into_iter()
        .collect();
    let mut fixture = Fixture::new(options);
    fixture.run(&registry, &event(EventKind::Identifier)).ok();

    let codes: Vec<&str> = fixture.sink.iter().map(|d| d.code).collect();
    assert_eq!(codes, ["W117"]);
    let diagnostic = fixture.sink.iter().next().expect("one diagnostic");
    assert_eq!((diagnostic.line, diagnostic.character), (3, 5));
}

#[test]
fn test_reentrant_emit_is_handled_before_returning() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Call, |ctx, rules| {
        let nested = EventContext::new(EventKind::Unreachable, ctx.pos).with_name("nested");
        rules.emit(&nested)?;
        assert_eq!(rules.recall("nested"), Some("seen"));
        Ok(())
    });
    registry.on(EventKind::Unreachable, |ctx, rules| {
        assert_eq!(ctx.name.as_deref(), Some("nested"));
        rules.remember("nested", "seen");
        Ok(())
    });

    let mut fixture = Fixture::new(OptionSet::new());
    assert_eq!(fixture.run(&registry, &event(EventKind::Call)), Ok(()));
    assert_eq!(fixture.state.get("nested"), Some("seen"));
}

#[test]
fn test_unbounded_reentrant_emit_faults() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Call, |ctx, rules| rules.emit(ctx));

    let mut fixture = Fixture::new(OptionSet::new());
    let fault = fixture
        .run(&registry, &event(EventKind::Call))
        .expect_err("recursion must be cut off");
    assert!(fault.message.contains("exceeded depth"), "{}", fault.message);
}

#[test]
fn test_remove_all() {
    let mut registry = EventRegistry::new();
    registry.on(EventKind::Call, |_, _| Ok(()));
    registry.remove_all();
    assert_eq!(registry.listener_count(), 0);
}

#[test]
fn test_context_builders() {
    let ctx = event(EventKind::Operator)
        .with_value("==")
        .with_code("compare")
        .with_substitutions(&["===", "=="]);
    assert_eq!(ctx.value.as_deref(), Some("=="));
    assert_eq!(ctx.code, Some("compare"));
    assert_eq!(ctx.substitutions[1].as_deref(), Some("=="));
    assert_eq!(ctx.start_line, 3);
}
