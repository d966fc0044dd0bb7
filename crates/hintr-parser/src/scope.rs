//! Scope stack and known globals.
//!
//! Frames are pushed on function/block entry and popped on exit. Name
//! resolution is split in two:
//!
//! - At a use, the stack is searched innermost-first. A hit bumps the
//!   binding's use count immediately.
//! - A miss is recorded against the innermost frame. When that frame is
//!   popped, its own bindings get a second chance (this is how hoisted `var`
//!   and function declarations written after their use are found); whatever
//!   is still unresolved moves to the parent frame. Leftovers at the global
//!   frame are implied globals unless the name is a known global.

use crate::events::Redeclaration;
use crate::options::OptionSet;
use hintr_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use hintr_common::{BindingKind, Position};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{Level, debug, span};

// =============================================================================
// Known globals
// =============================================================================

/// Names that exist without a declaration, with whether they may be assigned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownGlobals {
    names: FxHashMap<String, bool>,
}

impl KnownGlobals {
    pub fn new() -> Self {
        KnownGlobals::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, writable: bool) {
        self.names.insert(name.into(), writable);
    }

    pub fn remove(&mut self, name: &str) {
        self.names.remove(name);
    }

    /// `Some(writable)` for a known global.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn extend_static(&mut self, names: &[(&str, bool)]) {
        for &(name, writable) in names {
            self.names.insert(name.to_string(), writable);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.names.iter().map(|(name, writable)| (name.as_str(), *writable))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, bool)> for KnownGlobals {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        KnownGlobals {
            names: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, bool)> for KnownGlobals {
    fn extend<T: IntoIterator<Item = (String, bool)>>(&mut self, iter: T) {
        self.names.extend(iter);
    }
}

/// Source of the bundled known-globals sets enabled by environment options
/// such as `node` or `browser`.
pub trait EnvironmentProvider: Send + Sync {
    fn environment(&self, name: &str) -> Option<&'static [(&'static str, bool)]>;
}

// =============================================================================
// Frames
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Global,
    Function,
    Block,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    pub pos: Position,
    pub uses: u32,
    /// Position in the parameter list, for parameters.
    pub param_index: Option<u32>,
}

/// A reference that did not resolve when it was seen.
#[derive(Clone, Debug)]
pub struct UnresolvedUse {
    pub name: String,
    pub pos: Position,
    /// Options in force at the reference.
    pub options: OptionSet,
    pub in_typeof: bool,
    /// Plain assignment target: does not count as a read.
    pub is_write: bool,
    /// Came from a nested function.
    pub from_inner: bool,
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub kind: FrameKind,
    bindings: IndexMap<String, Binding>,
    labels: FxHashSet<String>,
    unresolved: Vec<UnresolvedUse>,
    strict: bool,
}

impl Frame {
    fn new(kind: FrameKind, strict: bool) -> Self {
        Frame {
            kind,
            bindings: IndexMap::new(),
            labels: FxHashSet::default(),
            unresolved: Vec::new(),
            strict,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(name, b)| (name.as_str(), b))
    }

    fn is_function_boundary(&self) -> bool {
        matches!(self.kind, FrameKind::Function | FrameKind::Global)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnusedEntry {
    pub name: String,
    pub binding: Binding,
    /// A parameter with no used parameter after it.
    pub last_param: bool,
}

#[derive(Clone, Debug)]
pub struct LateUse {
    pub name: String,
    pub use_pos: Position,
    pub options: OptionSet,
    pub binding: Binding,
}

#[derive(Clone, Debug)]
pub struct FrameExit {
    pub kind: FrameKind,
    pub unused: Vec<UnusedEntry>,
    pub late: Vec<LateUse>,
}

/// Result of closing the global frame.
#[derive(Clone, Debug)]
pub struct GlobalExit {
    pub unused: Vec<UnusedEntry>,
    pub late: Vec<LateUse>,
    pub unresolved: Vec<UnresolvedUse>,
}

// =============================================================================
// Scope stack
// =============================================================================

#[derive(Clone, Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
    exported: FxHashSet<String>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

impl ScopeStack {
    /// A stack holding only the global frame.
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Frame::new(FrameKind::Global, false)],
            exported: FxHashSet::default(),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> &Frame {
        // The global frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn is_global(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn is_strict(&self) -> bool {
        self.current().strict
    }

    /// Mark the innermost frame, and frames pushed later, as strict.
    pub fn set_strict(&mut self) {
        self.current_mut().strict = true;
    }

    /// Whether the nearest function (or the global frame) is strict.
    pub fn function_is_strict(&self) -> bool {
        self.frames[self.function_frame_index()].strict
    }

    pub fn push(&mut self, kind: FrameKind) {
        let strict = self.is_strict();
        self.frames.push(Frame::new(kind, strict));
    }

    fn function_frame_index(&self) -> usize {
        self.frames
            .iter()
            .rposition(Frame::is_function_boundary)
            .unwrap_or(0)
    }

    /// Innermost binding visible under `name`.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .take(MAX_SCOPE_WALK_ITERATIONS)
            .find_map(|frame| frame.bindings.get(name))
    }

    /// Bind `name` in the frame its kind belongs to.
    ///
    /// `Err` carries the kind of an existing binding that makes this
    /// declaration illegal (`let`/`const`/`class` clashes); the existing
    /// binding is kept. `Ok(Some(_))` reports a legal redeclaration or
    /// shadowing.
    pub fn declare(
        &mut self,
        name: &str,
        kind: BindingKind,
        pos: Position,
        param_index: Option<u32>,
    ) -> Result<Option<Redeclaration>, BindingKind> {
        let innermost = self.frames.len() - 1;
        let target = if kind == BindingKind::Var {
            self.function_frame_index()
        } else {
            innermost
        };

        // A hoisted `var` may not cross a block that binds the name lexically.
        for frame in &self.frames[target + 1..] {
            if let Some(existing) = frame.bindings.get(name) {
                if existing.kind.is_lexical() {
                    return Err(existing.kind);
                }
            }
        }

        if let Some(existing) = self.frames[target].bindings.get(name) {
            let existing_kind = existing.kind;
            let catch_var = existing_kind == BindingKind::Catch && kind == BindingKind::Var;
            if (kind.is_lexical() || existing_kind.is_lexical()) && !catch_var {
                return Err(existing_kind);
            }
            debug!(name, ?kind, ?existing_kind, "redeclared in same frame");
            return Ok(Some(Redeclaration::SameFrame(existing_kind)));
        }

        let shadowed = self.frames[..target]
            .iter()
            .rev()
            .take(MAX_SCOPE_WALK_ITERATIONS)
            .find_map(|frame| frame.bindings.get(name))
            .map(|outer| Redeclaration::OuterFrame(outer.kind));

        debug!(name, ?kind, frame = target, "declare");
        self.frames[target].bindings.insert(
            name.to_string(),
            Binding {
                kind,
                pos,
                uses: 0,
                param_index,
            },
        );
        Ok(shadowed)
    }

    /// Record a read of `name`. Returns whether it resolved immediately.
    pub fn use_name(&mut self, name: &str, pos: Position, options: &OptionSet, in_typeof: bool) -> bool {
        for frame in self.frames.iter_mut().rev().take(MAX_SCOPE_WALK_ITERATIONS) {
            if let Some(binding) = frame.bindings.get_mut(name) {
                binding.uses += 1;
                return true;
            }
        }
        self.current_mut().unresolved.push(UnresolvedUse {
            name: name.to_string(),
            pos,
            options: options.clone(),
            in_typeof,
            is_write: false,
            from_inner: false,
        });
        false
    }

    /// Turn the most recent use of `name` into a plain write.
    ///
    /// Called when an identifier that was just read turns out to be the
    /// target of `=`.
    pub fn retract_use(&mut self, name: &str) {
        for frame in self.frames.iter_mut().rev().take(MAX_SCOPE_WALK_ITERATIONS) {
            if let Some(binding) = frame.bindings.get_mut(name) {
                binding.uses = binding.uses.saturating_sub(1);
                return;
            }
        }
        if let Some(pending) = self
            .current_mut()
            .unresolved
            .iter_mut()
            .rev()
            .find(|u| u.name == name && !u.is_write)
        {
            pending.is_write = true;
        }
    }

    /// `/*exported name*/`: the global binding counts as used.
    pub fn mark_exported(&mut self, name: &str) {
        self.exported.insert(name.to_string());
    }

    // =========================================================================
    // Labels
    // =========================================================================

    fn function_frames(&self) -> &[Frame] {
        &self.frames[self.function_frame_index()..]
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.function_frames()
            .iter()
            .any(|frame| frame.labels.contains(name))
    }

    /// Returns `false` if the label is already in scope in this function.
    pub fn declare_label(&mut self, name: &str) -> bool {
        if self.has_label(name) {
            return false;
        }
        self.current_mut().labels.insert(name.to_string());
        true
    }

    pub fn remove_label(&mut self, name: &str) {
        if let Some(frame) = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.labels.contains(name))
        {
            frame.labels.remove(name);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Pop the innermost frame, resolving its pending uses.
    ///
    /// Returns `None` when only the global frame is left.
    pub fn pop(&mut self) -> Option<FrameExit> {
        if self.frames.len() <= 1 {
            return None;
        }
        let frame = self.frames.pop()?;
        let kind = frame.kind;
        let _span = span!(Level::DEBUG, "pop_frame", ?kind).entered();
        let (unused, late, leftovers) = close_frame(frame, None);
        let parent = self.current_mut();
        parent.unresolved.extend(leftovers);
        Some(FrameExit { kind, unused, late })
    }

    /// Close every remaining frame, global last.
    pub fn finish(mut self) -> GlobalExit {
        let mut unused = Vec::new();
        let mut late = Vec::new();
        while let Some(exit) = self.pop() {
            unused.extend(exit.unused);
            late.extend(exit.late);
        }
        let global = self.frames.pop().unwrap_or_else(|| Frame::new(FrameKind::Global, false));
        let _span = span!(Level::DEBUG, "close_global").entered();
        let (global_unused, global_late, unresolved) = close_frame(global, Some(&self.exported));
        unused.extend(global_unused);
        late.extend(global_late);
        debug!(unresolved = unresolved.len(), "global frame closed");
        GlobalExit {
            unused,
            late,
            unresolved,
        }
    }
}

/// Resolve a frame's pending uses against its own bindings and report what
/// stayed unused. Unresolved uses are returned for the parent frame.
fn close_frame(
    frame: Frame,
    exported: Option<&FxHashSet<String>>,
) -> (Vec<UnusedEntry>, Vec<LateUse>, Vec<UnresolvedUse>) {
    let Frame {
        kind,
        mut bindings,
        unresolved,
        ..
    } = frame;
    let mut late = Vec::new();
    let mut leftovers = Vec::new();

    for pending in unresolved {
        match bindings.get_mut(&pending.name) {
            Some(binding) => {
                if !pending.is_write {
                    binding.uses += 1;
                }
                if !pending.from_inner && pending.pos.offset < binding.pos.offset {
                    late.push(LateUse {
                        name: pending.name,
                        use_pos: pending.pos,
                        options: pending.options,
                        binding: binding.clone(),
                    });
                }
            }
            None => {
                debug!(name = %pending.name, "unresolved, moving to parent frame");
                leftovers.push(UnresolvedUse {
                    from_inner: pending.from_inner || kind == FrameKind::Function,
                    ..pending
                });
            }
        }
    }

    let last_used_param = bindings
        .values()
        .filter(|b| b.uses > 0)
        .filter_map(|b| b.param_index)
        .max();

    let unused = bindings
        .into_iter()
        .filter(|(name, binding)| {
            binding.uses == 0 && !exported.is_some_and(|set| set.contains(name))
        })
        .map(|(name, binding)| {
            let last_param = match (binding.param_index, last_used_param) {
                (Some(index), Some(last)) => index > last,
                (Some(_), None) => true,
                (None, _) => false,
            };
            UnusedEntry {
                name,
                binding,
                last_param,
            }
        })
        .collect();

    (unused, late, leftovers)
}
