//! Canonical JSON reply bodies.
//!
//! Every status the dispatcher produces on its own carries one of these
//! shapes. They are built fresh per call so callers can extend their copy
//! without affecting anyone else.

use serde_json::{json, Value};

/// Success template: `{"ok": true}`.
pub fn ok() -> Value {
    json!({ "ok": true })
}

/// Generic failure template: `{"ok": false}`.
pub fn error() -> Value {
    json!({ "ok": false })
}

/// Not-found template: `{"ok": false, "message": "Not Found"}`.
pub fn not_found() -> Value {
    json!({ "ok": false, "message": "Not Found" })
}

/// Failure body carrying the validation error for client debugging.
pub fn validation_error(detail: Value) -> Value {
    let mut body = error();
    body["error"] = detail;
    body
}
