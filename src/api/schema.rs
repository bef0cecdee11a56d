//! Input validation seam.
//!
//! The dispatcher hands each registered schema the merged query+body object
//! as a `serde_json::Value`; the schema either produces a typed value or a
//! structured failure that becomes the `error` field of a 400 body.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A structured validation failure, serialized into 400 response bodies.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct SchemaError {
    /// What failed to validate, in serde's words.
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Declarative input validation: turn an untyped candidate into a typed value.
///
/// Each registered handler owns one schema; on success the output becomes the
/// `input` field of the callback's context.
pub trait Schema: Send + Sync + 'static {
    type Output: Send + 'static;

    fn validate(&self, candidate: Value) -> Result<Self::Output, SchemaError>;
}

/// Serde-backed schema: any `Deserialize` type validates itself.
///
/// Optional fields and defaults ride on serde attributes, e.g.
/// `#[serde(default = "default_limit")]` for a paging limit of 50.
pub struct TypedSchema<T>(PhantomData<fn() -> T>);

impl<T> TypedSchema<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn validate(&self, candidate: Value) -> Result<T, SchemaError> {
        serde_json::from_value(candidate).map_err(|err| SchemaError::new(err.to_string()))
    }
}
