//! Request dispatch: the built artifact and its per-request flow.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → lookup (method outside the table → 405)
//!     → merge (query scalars + JSON body; body wins on key collision)
//!     → validate (schema failure → 400 with the error attached)
//!     → invoke (callback's response passed through untouched)
//!     → map (NotFound → 404, NotImplemented → 405, anything else → 500)
//! ```
//!
//! # Design Decisions
//! - Every invocation produces exactly one JSON response; nothing propagates
//!   past the dispatcher
//! - The handler table is immutable after `build()`; in-flight requests share
//!   it read-only
//! - A malformed JSON request body counts as a validation failure

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, MethodRouter};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::api::builder::ErasedHandler;
use crate::api::method::ApiMethod;
use crate::api::reply;
use crate::observability::metrics;

/// Largest request body the dispatcher will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The built handler: an immutable method table plus the per-request flow.
///
/// Cloning shares the table; `HandlerBuilder::build` is the only way to get
/// one, and each call snapshots the registrations made so far.
#[derive(Clone)]
pub struct ApiDispatcher {
    handlers: Arc<HashMap<ApiMethod, ErasedHandler>>,
}

impl ApiDispatcher {
    pub(crate) fn new(handlers: Arc<HashMap<ApiMethod, ErasedHandler>>) -> Self {
        Self { handlers }
    }

    /// Handle one request. Always yields a JSON response.
    pub async fn dispatch(&self, request: Request) -> Response {
        let start = Instant::now();
        let method_label = request.method().to_string();

        let handler = ApiMethod::from_http(request.method())
            .and_then(|method| self.handlers.get(&method))
            .cloned();
        let Some(handler) = handler else {
            tracing::debug!(method = %method_label, "No handler registered");
            let response = json_response(StatusCode::METHOD_NOT_ALLOWED, reply::error());
            return finish(&method_label, response, start);
        };

        let (parts, body) = request.into_parts();
        let mut candidate = parse_query(parts.uri.query().unwrap_or(""));

        let body_bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(method = %method_label, error = %err, "Failed to read request body");
                let response = json_response(
                    StatusCode::BAD_REQUEST,
                    reply::validation_error(json!({"message": "unreadable request body"})),
                );
                return finish(&method_label, response, start);
            }
        };
        if !body_bytes.is_empty() {
            match serde_json::from_slice::<Value>(&body_bytes) {
                Ok(Value::Object(map)) => {
                    // Body fields overwrite query fields of the same name.
                    for (key, value) in map {
                        candidate.insert(key, value);
                    }
                }
                Ok(_) => {
                    let response = json_response(
                        StatusCode::BAD_REQUEST,
                        reply::validation_error(
                            json!({"message": "request body must be a JSON object"}),
                        ),
                    );
                    return finish(&method_label, response, start);
                }
                Err(err) => {
                    let response = json_response(
                        StatusCode::BAD_REQUEST,
                        reply::validation_error(json!({"message": err.to_string()})),
                    );
                    return finish(&method_label, response, start);
                }
            }
        }

        let response = handler(Value::Object(candidate), parts).await;
        finish(&method_label, response, start)
    }

    /// Mount the dispatcher as a single Axum route handling every verb.
    pub fn into_route(self) -> MethodRouter {
        any(move |request: Request| {
            let dispatcher = self.clone();
            async move { dispatcher.dispatch(request).await }
        })
    }
}

/// Build a JSON response with the given status.
pub(crate) fn json_response(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn finish(method: &str, response: Response, start: Instant) -> Response {
    metrics::record_request(method, response.status().as_u16(), start);
    response
}

/// Parse a query string into a JSON object, inferring scalar types.
///
/// A value that parses as a JSON number, bool or null is inserted typed so a
/// schema sees `limit=10` as an integer; anything else stays a string.
pub(crate) fn parse_query(query: &str) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        map.insert(key.into_owned(), infer_scalar(&value));
    }
    map
}

fn infer_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => value,
        _ => Value::String(raw.to_string()),
    }
}
