//! Request-handler construction subsystem.
//!
//! # Data Flow
//! ```text
//! HandlerBuilder (method/get/post/put registrations)
//!     → build() snapshot
//!     → ApiDispatcher
//!         lookup → merge query+body → validate → invoke → map errors
//!     → JSON response
//!         200 callback-controlled, 400 validation, 404 not-found,
//!         405 unregistered/not-implemented, 500 unclassified
//! ```
//!
//! # Design Decisions
//! - Handler table keyed by a closed method enum; unknown verbs answer 405
//! - Callbacks receive schema-typed input and return the success response
//!   themselves; the dispatcher never post-processes a success
//! - Control-flow errors are a tagged enum matched at the dispatch boundary
//! - Built dispatchers snapshot the table; later registrations don't leak

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod method;
pub mod reply;
pub mod schema;

pub use builder::{ApiContext, HandlerBuilder};
pub use dispatch::ApiDispatcher;
pub use error::{ControllerError, ControllerResult};
pub use method::ApiMethod;
pub use schema::{Schema, SchemaError, TypedSchema};
