//! Typed control-flow errors for handler callbacks.

use thiserror::Error;

/// Errors a handler callback raises to request a specific HTTP outcome.
///
/// `NotFound` and `NotImplemented` are zero-payload markers; the dispatcher
/// matches on the kind and answers with a fixed status and body, never with
/// the error's own message. Everything else travels as `Internal` and
/// surfaces as a generic 500 with no detail leaked to the client.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The requested entity does not exist. Mapped to 404.
    #[error("not found")]
    NotFound,

    /// The operation is declared but not available. Mapped to 405.
    #[error("not implemented")]
    NotImplemented,

    /// Unclassified failure. Mapped to 500; detail stays server-side.
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ControllerError {
    /// Wrap any error as an unclassified internal failure.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Internal(err.into())
    }
}

/// Result type for handler callbacks.
pub type ControllerResult<T> = Result<T, ControllerError>;
