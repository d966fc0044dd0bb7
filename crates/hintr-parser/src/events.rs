//! Event dispatch fabric.
//!
//! The parser reports what it recognizes as typed events; rules subscribe to
//! the kinds they care about. Listeners are registered once, before linting
//! starts, through `&mut EventRegistry`. Dispatch only needs `&EventRegistry`,
//! so the borrow checker rejects any attempt to register a listener while an
//! emission is in progress.
//!
//! Listeners receive an immutable `EventContext` and a `RuleContext` giving
//! read access to the live option set and scope stack, a diagnostic sink and
//! re-entrant emission.

use crate::fault::RuleFault;
use crate::options::OptionSet;
use crate::scope::{KnownGlobals, ScopeStack};
use crate::sink::DiagnosticSink;
use hintr_common::diagnostics::{Substitutions, substitutions};
use hintr_common::{BindingKind, Position};
use hintr_scanner::{SyntaxKind, Token, TokenFlags, TokenValue};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Depth limit for listeners emitting from inside listeners.
const MAX_REENTRANT_DEPTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// An identifier read, written or used as a property key.
    Identifier,
    String,
    Number,
    RegExp,
    Template,
    /// A name bound by a declaration, parameter, catch clause or import.
    Declaration,
    /// A unary, binary, logical or update operator.
    Operator,
    Assignment,
    Call,
    New,
    MemberAccess,
    /// Start of a statement.
    Statement,
    ExpressionStatement,
    EmptyStatement,
    /// A statement terminated by automatic semicolon insertion.
    MissingSemicolon,
    /// The test of an `if`, loop or conditional.
    Condition,
    /// Start of a block or of the body of a control statement.
    Block,
    Unreachable,
    Fallthrough,
    /// An operator or comma that starts a new line.
    LineBreak,
    FunctionEnter,
    FunctionExit,
    UnusedBinding,
    UsedBeforeDefinition,
    /// One reference to a name that resolved to no binding and no known global.
    ImpliedGlobal,
    /// A source line the parser has moved past.
    Line,
}

impl EventKind {
    pub const COUNT: usize = EventKind::Line as usize + 1;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Shape of an expression, as far as rules need to know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Identifier,
    Literal,
    Template,
    Array,
    Object,
    Function,
    Arrow,
    Class,
    Member,
    Call,
    New,
    Assignment,
    Update,
    Delete,
    Unary,
    Binary,
    Logical,
    Conditional,
    Sequence,
    Await,
    Yield,
    This,
    Super,
    MetaProperty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Block,
    Var,
    Let,
    Const,
    Function,
    Class,
    Expression,
    Empty,
    If,
    For,
    ForIn,
    ForOf,
    While,
    DoWhile,
    Switch,
    Try,
    Throw,
    Return,
    Break,
    Continue,
    With,
    Debugger,
    Labeled,
    Import,
    Export,
}

/// How a declaration collides with an existing binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Redeclaration {
    /// Same name already bound in the same frame.
    SameFrame(BindingKind),
    /// Same name bound in an enclosing frame.
    OuterFrame(BindingKind),
}

/// Size and shape of a function body, reported on `FunctionExit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FunctionMetrics {
    pub parameters: u32,
    pub statements: u32,
    /// Cyclomatic complexity, starting at 1.
    pub complexity: u32,
    /// Deepest block nesting inside the function body.
    pub max_depth: u32,
}

/// Everything a listener learns about one event.
///
/// Built fresh for each emission and never mutated while listeners run.
/// Equality and hashing are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventContext {
    pub kind: EventKind,
    /// Kind of the token that triggered the event.
    pub token: Option<SyntaxKind>,
    pub token_flags: TokenFlags,
    /// Semantic code identifying the event's category, when it has one.
    pub code: Option<&'static str>,
    /// Literal value, operator text or other event-specific text.
    pub value: Option<String>,
    pub quote: Option<char>,
    /// Decoded name.
    pub name: Option<String>,
    /// Name as spelled in the source, escapes included.
    pub raw_name: Option<String>,
    pub pos: Position,
    /// Where a construct spanning several lines started.
    pub start_line: u32,
    pub start_char: u32,
    pub is_property: bool,
    pub is_malformed: bool,
    /// Slots `{a}`..`{d}` for message templates.
    pub substitutions: Substitutions,
    pub expr: Option<ExprKind>,
    pub parenthesized: bool,
    /// Literal spelling of the left and right operands of a binary operator,
    /// or the dotted path of a call/member/assignment target in slot 0.
    pub operands: [Option<String>; 2],
    pub statement: Option<StatementKind>,
    /// Kind of the first statement of a control statement's body.
    pub body: Option<StatementKind>,
    /// Whether the body of a control statement is a braced block.
    pub braced: bool,
    pub binding: Option<BindingKind>,
    pub redeclares: Option<Redeclaration>,
    /// A parameter with no used parameter after it.
    pub last_param: bool,
    pub in_loop: bool,
    pub metrics: Option<FunctionMetrics>,
    pub depth: u32,
}

impl EventContext {
    pub fn new(kind: EventKind, pos: Position) -> Self {
        EventContext {
            kind,
            token: None,
            token_flags: TokenFlags::empty(),
            code: None,
            value: None,
            quote: None,
            name: None,
            raw_name: None,
            pos,
            start_line: pos.line,
            start_char: pos.character,
            is_property: false,
            is_malformed: false,
            substitutions: Default::default(),
            expr: None,
            parenthesized: false,
            operands: Default::default(),
            statement: None,
            body: None,
            braced: false,
            binding: None,
            redeclares: None,
            last_param: false,
            in_loop: false,
            metrics: None,
            depth: 0,
        }
    }

    /// Context for an event triggered by `token`, carrying its decoded value.
    pub fn for_token(kind: EventKind, token: &Token) -> Self {
        let mut ctx = EventContext::new(kind, token.pos);
        ctx.token = Some(token.kind);
        ctx.token_flags = token.flags;
        match &token.value {
            TokenValue::Name(name) => {
                ctx.name = Some(name.clone());
                ctx.raw_name = Some(token.text.clone());
                ctx.is_property = token.flags.contains(TokenFlags::PROPERTY_NAME);
            }
            TokenValue::Str { value, quote } => {
                ctx.value = Some(value.clone());
                ctx.quote = Some(*quote);
            }
            TokenValue::Template(cooked) => ctx.value = Some(cooked.clone()),
            TokenValue::Number(_) | TokenValue::RegExp { .. } | TokenValue::None => {
                ctx.value = Some(token.text.clone());
            }
            TokenValue::Comment(_) => {}
        }
        if token.end_line != token.pos.line {
            ctx.start_line = token.pos.line;
            ctx.start_char = token.pos.character;
        }
        ctx
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Derive a context with the given substitution slots filled.
    #[must_use]
    pub fn with_substitutions(mut self, values: &[&str]) -> Self {
        self.substitutions = substitutions(values);
        self
    }
}

pub type Listener =
    Box<dyn Fn(&EventContext, &mut RuleContext<'_>) -> Result<(), RuleFault> + Send + Sync>;

/// Listeners grouped by event kind, in registration order.
pub struct EventRegistry {
    listeners: Vec<Vec<Listener>>,
}

impl Default for EventRegistry {
    fn default() -> Self {
        EventRegistry::new()
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.listeners.iter().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        EventRegistry {
            listeners: (0..EventKind::COUNT).map(|_| Vec::new()).collect(),
        }
    }

    /// Register `listener` for `kind`. Listeners run in registration order.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&EventContext, &mut RuleContext<'_>) -> Result<(), RuleFault> + Send + Sync + 'static,
    {
        self.listeners[kind.index()].push(Box::new(listener));
    }

    /// Drop every registration.
    pub fn remove_all(&mut self) {
        for listeners in &mut self.listeners {
            listeners.clear();
        }
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        !self.listeners[kind.index()].is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.iter().map(Vec::len).sum()
    }

    /// Run every listener for `ctx.kind`, stopping at the first fault.
    pub fn dispatch(&self, ctx: &EventContext, rules: &mut RuleContext<'_>) -> Result<(), RuleFault> {
        for listener in &self.listeners[ctx.kind.index()] {
            listener(ctx, rules)?;
        }
        Ok(())
    }
}

/// Small per-unit key/value store for rules that compare events with each
/// other (for example "first quote style seen").
#[derive(Debug, Default)]
pub struct UnitState {
    values: FxHashMap<&'static str, String>,
}

impl UnitState {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &'static str, value: String) -> Option<String> {
        self.values.insert(key, value)
    }
}

/// What a listener can see and do while handling an event.
pub struct RuleContext<'a> {
    pub(crate) registry: &'a EventRegistry,
    pub(crate) options: &'a OptionSet,
    pub(crate) scopes: &'a ScopeStack,
    pub(crate) globals: &'a KnownGlobals,
    pub(crate) sink: &'a mut DiagnosticSink,
    pub(crate) state: &'a mut UnitState,
    pub(crate) depth: usize,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        registry: &'a EventRegistry,
        options: &'a OptionSet,
        scopes: &'a ScopeStack,
        globals: &'a KnownGlobals,
        sink: &'a mut DiagnosticSink,
        state: &'a mut UnitState,
    ) -> Self {
        RuleContext {
            registry,
            options,
            scopes,
            globals,
            sink,
            state,
            depth: 0,
        }
    }

    pub fn options(&self) -> &OptionSet {
        self.options
    }

    pub fn is_enabled(&self, option: &str) -> bool {
        self.options.is_enabled(option)
    }

    pub fn scopes(&self) -> &ScopeStack {
        self.scopes
    }

    pub fn globals(&self) -> &KnownGlobals {
        self.globals
    }

    pub fn is_strict(&self) -> bool {
        self.scopes.is_strict()
    }

    /// Raise `code` at `pos` unless the active options disable it.
    ///
    /// Returns whether a diagnostic was recorded.
    pub fn raise(&mut self, code: &'static str, pos: Position, slots: &Substitutions) -> bool {
        if self.options.is_code_disabled(code) {
            trace!(code, "diagnostic disabled by options");
            return false;
        }
        self.sink.push(code, pos, slots)
    }

    /// Raise `code` at the event's position with the given slot values.
    pub fn warn(&mut self, code: &'static str, ctx: &EventContext, values: &[&str]) -> bool {
        self.raise(code, ctx.pos, &substitutions(values))
    }

    /// Emit a nested event. It is fully handled before this call returns.
    pub fn emit(&mut self, ctx: &EventContext) -> Result<(), RuleFault> {
        if self.depth >= MAX_REENTRANT_DEPTH {
            return Err(RuleFault::new(format!(
                "re-entrant emission of {:?} exceeded depth {MAX_REENTRANT_DEPTH}",
                ctx.kind
            )));
        }
        let registry = self.registry;
        self.depth += 1;
        let result = registry.dispatch(ctx, self);
        self.depth -= 1;
        result
    }

    /// Value remembered for `key` earlier in this unit.
    pub fn recall(&self, key: &str) -> Option<&str> {
        self.state.get(key)
    }

    /// Remember `value` for `key`, returning the previous value.
    pub fn remember(&mut self, key: &'static str, value: impl Into<String>) -> Option<String> {
        self.state.insert(key, value.into())
    }
}
