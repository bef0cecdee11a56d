//! Request-handling toolkit for JSON web backends.
//!
//! Builds HTTP route handlers that validate input against a declared schema,
//! dispatch to a per-method callback, and translate typed errors into HTTP
//! status codes. A second, smaller piece wraps outbound JSON calls for the
//! upstream passthrough controller.
//!
//! ```text
//! HandlerBuilder → build() → ApiDispatcher → mounted as an Axum route
//!                                 │
//!                                 ├─ 405 method not registered
//!                                 ├─ 400 schema validation failed
//!                                 ├─ 200 callback wrote its response
//!                                 └─ 404/405/500 mapped from typed errors
//! ```

pub mod api;
pub mod config;
pub mod fetch;
pub mod observability;
pub mod proxy;

pub use api::{
    ApiContext, ApiDispatcher, ApiMethod, ControllerError, ControllerResult, HandlerBuilder,
    Schema, SchemaError, TypedSchema,
};
pub use config::AppConfig;
pub use fetch::FetchError;
