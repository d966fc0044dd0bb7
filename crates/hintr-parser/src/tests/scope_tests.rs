use crate::events::Redeclaration;
use crate::options::OptionSet;
use crate::scope::{FrameKind, KnownGlobals, ScopeStack};
use hintr_common::{BindingKind, Position};

fn at(line: u32, offset: u32) -> Position {
    Position::new(line, 1, offset, 1)
}

#[test]
fn test_var_hoists_to_function_frame() {
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Function);
    scopes.push(FrameKind::Block);
    assert_eq!(scopes.declare("a", BindingKind::Var, at(2, 10), None), Ok(None));
    assert_eq!(scopes.declare("b", BindingKind::Let, at(2, 20), None), Ok(None));

    let block = scopes.pop().expect("block frame");
    assert_eq!(block.kind, FrameKind::Block);
    let names: Vec<&str> = block.unused.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["b"]);
    assert!(scopes.lookup("a").is_some());
    assert!(scopes.lookup("b").is_none());
}

#[test]
fn test_lexical_redeclaration_is_rejected() {
    let mut scopes = ScopeStack::new();
    assert_eq!(scopes.declare("x", BindingKind::Let, at(1, 0), None), Ok(None));
    assert_eq!(
        scopes.declare("x", BindingKind::Var, at(2, 10), None),
        Err(BindingKind::Let)
    );
    assert_eq!(scopes.lookup("x").map(|b| b.kind), Some(BindingKind::Let));
}

#[test]
fn test_var_cannot_cross_lexical_block_binding() {
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Block);
    scopes.declare("x", BindingKind::Const, at(1, 0), None).ok();
    assert_eq!(
        scopes.declare("x", BindingKind::Var, at(2, 10), None),
        Err(BindingKind::Const)
    );
}

#[test]
fn test_var_redeclaration_and_shadowing() {
    let mut scopes = ScopeStack::new();
    scopes.declare("x", BindingKind::Var, at(1, 0), None).ok();
    assert_eq!(
        scopes.declare("x", BindingKind::Var, at(2, 10), None),
        Ok(Some(Redeclaration::SameFrame(BindingKind::Var)))
    );

    scopes.push(FrameKind::Function);
    assert_eq!(
        scopes.declare("x", BindingKind::Param, at(3, 20), Some(0)),
        Ok(Some(Redeclaration::OuterFrame(BindingKind::Var)))
    );
}

#[test]
fn test_catch_parameter_allows_var() {
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Function);
    scopes.push(FrameKind::Block);
    scopes.declare("e", BindingKind::Catch, at(1, 0), None).ok();
    scopes.push(FrameKind::Block);
    assert!(scopes.declare("e", BindingKind::Var, at(2, 10), None).is_ok());
}

#[test]
fn test_hoisted_use_is_resolved_on_pop_and_reported_late() {
    let options = OptionSet::new();
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Function);
    assert!(!scopes.use_name("helper", at(2, 15), &options, false));
    scopes
        .declare("helper", BindingKind::Function, at(5, 40), None)
        .ok();

    let exit = scopes.pop().expect("function frame");
    assert!(exit.unused.is_empty());
    assert_eq!(exit.late.len(), 1);
    assert_eq!(exit.late[0].name, "helper");
    assert_eq!(exit.late[0].use_pos.line, 2);
    assert_eq!(exit.late[0].binding.kind, BindingKind::Function);
}

#[test]
fn test_unresolved_uses_reach_the_global_frame() {
    let options = OptionSet::new();
    let mut scopes = ScopeStack::new();
    scopes.use_name("window", at(1, 0), &options, false);
    scopes.push(FrameKind::Function);
    scopes.use_name("document", at(2, 10), &options, true);
    scopes.pop();

    let exit = scopes.finish();
    let names: Vec<(&str, bool, bool)> = exit
        .unresolved
        .iter()
        .map(|u| (u.name.as_str(), u.in_typeof, u.from_inner))
        .collect();
    assert_eq!(names, [("window", false, false), ("document", true, true)]);
}

#[test]
fn test_retracted_use_becomes_a_write() {
    let options = OptionSet::new();
    let mut scopes = ScopeStack::new();
    scopes.declare("count", BindingKind::Var, at(1, 0), None).ok();
    scopes.use_name("count", at(2, 10), &options, false);
    scopes.retract_use("count");
    scopes.use_name("missing", at(3, 20), &options, false);
    scopes.retract_use("missing");

    let exit = scopes.finish();
    assert_eq!(exit.unused.len(), 1);
    assert_eq!(exit.unused[0].name, "count");
    assert!(exit.unresolved[0].is_write);
}

#[test]
fn test_last_param_flag() {
    let options = OptionSet::new();
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Function);
    for (index, name) in ["a", "b", "c"].into_iter().enumerate() {
        scopes
            .declare(name, BindingKind::Param, at(1, index as u32), Some(index as u32))
            .ok();
    }
    scopes.use_name("b", at(2, 10), &options, false);

    let exit = scopes.pop().expect("function frame");
    let flags: Vec<(&str, bool)> = exit
        .unused
        .iter()
        .map(|u| (u.name.as_str(), u.last_param))
        .collect();
    assert_eq!(flags, [("a", false), ("c", true)]);
}

#[test]
fn test_exported_global_is_not_unused() {
    let mut scopes = ScopeStack::new();
    scopes.declare("init", BindingKind::Function, at(1, 0), None).ok();
    scopes.declare("other", BindingKind::Var, at(2, 10), None).ok();
    scopes.mark_exported("init");

    let exit = scopes.finish();
    let names: Vec<&str> = exit.unused.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["other"]);
}

#[test]
fn test_labels_are_function_scoped() {
    let mut scopes = ScopeStack::new();
    assert!(scopes.declare_label("outer"));
    assert!(!scopes.declare_label("outer"));
    scopes.push(FrameKind::Block);
    assert!(scopes.has_label("outer"));
    scopes.push(FrameKind::Function);
    assert!(!scopes.has_label("outer"));
    scopes.pop();
    scopes.pop();
    scopes.remove_label("outer");
    assert!(!scopes.has_label("outer"));
}

#[test]
fn test_strictness_is_inherited() {
    let mut scopes = ScopeStack::new();
    scopes.push(FrameKind::Function);
    assert!(!scopes.function_is_strict());
    scopes.set_strict();
    scopes.push(FrameKind::Block);
    assert!(scopes.is_strict());
    assert!(scopes.function_is_strict());
    scopes.pop();
    scopes.pop();
    assert!(!scopes.is_strict());
}

#[test]
fn test_known_globals() {
    let mut globals: KnownGlobals = [("console".to_string(), true)].into_iter().collect();
    globals.extend_static(&[("NaN", false), ("window", false)]);
    globals.remove("window");
    assert_eq!(globals.get("console"), Some(true));
    assert_eq!(globals.get("NaN"), Some(false));
    assert!(!globals.contains("window"));
    assert_eq!(globals.len(), 2);
}
