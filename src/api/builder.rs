//! Per-method handler registration.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::api::dispatch::{json_response, ApiDispatcher};
use crate::api::error::ControllerError;
use crate::api::method::ApiMethod;
use crate::api::reply;
use crate::api::schema::Schema;

/// Context handed to a handler callback.
pub struct ApiContext<T> {
    /// Validated, schema-typed input (merged query + body).
    pub input: T,
    /// Request metadata: headers, URI, extensions.
    pub parts: Parts,
}

/// A registered handler with its schema type erased behind a closure.
///
/// The closure validates the candidate input, invokes the typed callback and
/// maps control-flow errors to responses, so the dispatcher's table stays
/// homogeneous.
pub(crate) type ErasedHandler =
    Arc<dyn Fn(Value, Parts) -> BoxFuture<'static, Response> + Send + Sync>;

/// Fluent accumulator of per-method (schema, callback) registrations.
///
/// Registration consumes and returns the builder, so there is never an alias
/// of the table being mutated. Registering the same method twice keeps the
/// later entry. `build` snapshots the table; a dispatcher built earlier never
/// observes later registrations.
#[derive(Default)]
pub struct HandlerBuilder {
    handlers: HashMap<ApiMethod, ErasedHandler>,
}

impl HandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an arbitrary method.
    ///
    /// Registration cannot fail; a bad schema only surfaces at validation
    /// time, as a 400 on the requests it rejects.
    pub fn method<S, F, Fut>(mut self, method: ApiMethod, schema: S, callback: F) -> Self
    where
        S: Schema,
        F: Fn(ApiContext<S::Output>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, ControllerError>> + Send + 'static,
    {
        let schema = Arc::new(schema);
        let callback = Arc::new(callback);

        let handler: ErasedHandler = Arc::new(move |candidate, parts| {
            let schema = Arc::clone(&schema);
            let callback = Arc::clone(&callback);
            Box::pin(async move {
                let input = match schema.validate(candidate) {
                    Ok(input) => input,
                    Err(err) => {
                        tracing::debug!(error = %err, "Input validation failed");
                        let detail = serde_json::to_value(&err)
                            .unwrap_or_else(|_| Value::String(err.to_string()));
                        return json_response(
                            StatusCode::BAD_REQUEST,
                            reply::validation_error(detail),
                        );
                    }
                };

                match callback(ApiContext { input, parts }).await {
                    Ok(response) => response,
                    Err(ControllerError::NotFound) => {
                        json_response(StatusCode::NOT_FOUND, reply::not_found())
                    }
                    Err(ControllerError::NotImplemented) => {
                        json_response(StatusCode::METHOD_NOT_ALLOWED, reply::error())
                    }
                    Err(ControllerError::Internal(err)) => {
                        tracing::error!(error = %err, "Handler callback failed");
                        json_response(StatusCode::INTERNAL_SERVER_ERROR, reply::error())
                    }
                }
            })
        });

        self.handlers.insert(method, handler);
        self
    }

    /// Register a GET handler.
    pub fn get<S, F, Fut>(self, schema: S, callback: F) -> Self
    where
        S: Schema,
        F: Fn(ApiContext<S::Output>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, ControllerError>> + Send + 'static,
    {
        self.method(ApiMethod::Get, schema, callback)
    }

    /// Register a POST handler.
    pub fn post<S, F, Fut>(self, schema: S, callback: F) -> Self
    where
        S: Schema,
        F: Fn(ApiContext<S::Output>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, ControllerError>> + Send + 'static,
    {
        self.method(ApiMethod::Post, schema, callback)
    }

    /// Register a PUT handler.
    pub fn put<S, F, Fut>(self, schema: S, callback: F) -> Self
    where
        S: Schema,
        F: Fn(ApiContext<S::Output>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, ControllerError>> + Send + 'static,
    {
        self.method(ApiMethod::Put, schema, callback)
    }

    /// Snapshot the current table into an independent dispatcher.
    pub fn build(&self) -> ApiDispatcher {
        ApiDispatcher::new(Arc::new(self.handlers.clone()))
    }
}
