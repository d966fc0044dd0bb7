//! Known-globals tables.
//!
//! Each table lists `(name, writable)`. The ECMAScript table is always
//! known; the others are switched on by the environment option of the
//! same name, either in the base options or through a directive.

use hintr_parser::{EnvironmentProvider, KnownGlobals};

/// Built-ins of the language itself.
pub static ECMASCRIPT: &[(&str, bool)] = &[
    ("AggregateError", false),
    ("Array", false),
    ("ArrayBuffer", false),
    ("Atomics", false),
    ("BigInt", false),
    ("BigInt64Array", false),
    ("BigUint64Array", false),
    ("Boolean", false),
    ("DataView", false),
    ("Date", false),
    ("decodeURI", false),
    ("decodeURIComponent", false),
    ("encodeURI", false),
    ("encodeURIComponent", false),
    ("Error", false),
    ("escape", false),
    ("eval", false),
    ("EvalError", false),
    ("FinalizationRegistry", false),
    ("Float32Array", false),
    ("Float64Array", false),
    ("Function", false),
    ("globalThis", false),
    ("Infinity", false),
    ("Int16Array", false),
    ("Int32Array", false),
    ("Int8Array", false),
    ("Intl", false),
    ("isFinite", false),
    ("isNaN", false),
    ("JSON", false),
    ("Map", false),
    ("Math", false),
    ("NaN", false),
    ("Number", false),
    ("Object", false),
    ("parseFloat", false),
    ("parseInt", false),
    ("Promise", false),
    ("Proxy", false),
    ("RangeError", false),
    ("ReferenceError", false),
    ("Reflect", false),
    ("RegExp", false),
    ("Set", false),
    ("SharedArrayBuffer", false),
    ("String", false),
    ("Symbol", false),
    ("SyntaxError", false),
    ("TypeError", false),
    ("Uint16Array", false),
    ("Uint32Array", false),
    ("Uint8Array", false),
    ("Uint8ClampedArray", false),
    ("undefined", false),
    ("unescape", false),
    ("URIError", false),
    ("WeakMap", false),
    ("WeakRef", false),
    ("WeakSet", false),
];

pub static BROWSER: &[(&str, bool)] = &[
    ("atob", false),
    ("Blob", false),
    ("btoa", false),
    ("cancelAnimationFrame", false),
    ("clearInterval", false),
    ("clearTimeout", false),
    ("CustomEvent", false),
    ("document", false),
    ("Element", false),
    ("Event", false),
    ("fetch", false),
    ("File", false),
    ("FileReader", false),
    ("FormData", false),
    ("frames", false),
    ("getComputedStyle", false),
    ("history", false),
    ("HTMLElement", false),
    ("Image", false),
    ("IntersectionObserver", false),
    ("localStorage", false),
    ("location", true),
    ("matchMedia", false),
    ("MutationObserver", false),
    ("name", true),
    ("navigator", false),
    ("Node", false),
    ("NodeList", false),
    ("onload", true),
    ("parent", false),
    ("performance", false),
    ("requestAnimationFrame", false),
    ("screen", false),
    ("self", false),
    ("sessionStorage", false),
    ("setInterval", false),
    ("setTimeout", false),
    ("status", true),
    ("top", false),
    ("URL", false),
    ("URLSearchParams", false),
    ("WebSocket", false),
    ("window", false),
    ("Worker", false),
    ("XMLHttpRequest", false),
];

/// Development helpers such as `console` and `alert`.
pub static DEVEL: &[(&str, bool)] = &[
    ("alert", false),
    ("confirm", false),
    ("console", false),
    ("prompt", false),
];

pub static NODE: &[(&str, bool)] = &[
    ("__dirname", false),
    ("__filename", false),
    ("Buffer", false),
    ("clearImmediate", false),
    ("clearInterval", false),
    ("clearTimeout", false),
    ("console", false),
    ("exports", true),
    ("global", false),
    ("module", false),
    ("process", false),
    ("require", false),
    ("setImmediate", false),
    ("setInterval", false),
    ("setTimeout", false),
];

pub static WORKER: &[(&str, bool)] = &[
    ("close", false),
    ("FileReaderSync", false),
    ("importScripts", false),
    ("onmessage", true),
    ("postMessage", false),
    ("self", false),
];

pub static MOCHA: &[(&str, bool)] = &[
    ("after", false),
    ("afterEach", false),
    ("before", false),
    ("beforeEach", false),
    ("context", false),
    ("describe", false),
    ("it", false),
    ("setup", false),
    ("specify", false),
    ("suite", false),
    ("suiteSetup", false),
    ("suiteTeardown", false),
    ("teardown", false),
    ("test", false),
    ("xcontext", false),
    ("xdescribe", false),
    ("xit", false),
    ("xspecify", false),
];

/// The environment tables shipped with the linter.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledEnvironments;

impl EnvironmentProvider for BundledEnvironments {
    fn environment(&self, name: &str) -> Option<&'static [(&'static str, bool)]> {
        match name {
            "browser" => Some(BROWSER),
            "devel" => Some(DEVEL),
            "mocha" => Some(MOCHA),
            "node" => Some(NODE),
            "worker" => Some(WORKER),
            _ => None,
        }
    }
}

/// Globals known in every unit.
pub fn standard_globals() -> KnownGlobals {
    let mut globals = KnownGlobals::new();
    globals.extend_static(ECMASCRIPT);
    globals
}
