//! Routable HTTP method enumeration.

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// The closed set of HTTP verbs the handler table can be keyed by.
///
/// Because the table is keyed by this enum, only methods in this set can ever
/// carry a handler; anything else is unroutable by construction and the
/// dispatcher answers 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl ApiMethod {
    /// Map an incoming `http::Method` onto the closed set.
    ///
    /// Returns `None` for verbs outside the set (PATCH, HEAD, ...).
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::DELETE => Some(Self::Delete),
            Method::OPTIONS => Some(Self::Options),
            _ => None,
        }
    }

    /// Canonical upper-case name, for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_methods() {
        assert_eq!(ApiMethod::from_http(&Method::GET), Some(ApiMethod::Get));
        assert_eq!(ApiMethod::from_http(&Method::POST), Some(ApiMethod::Post));
        assert_eq!(ApiMethod::from_http(&Method::PUT), Some(ApiMethod::Put));
        assert_eq!(
            ApiMethod::from_http(&Method::DELETE),
            Some(ApiMethod::Delete)
        );
        assert_eq!(
            ApiMethod::from_http(&Method::OPTIONS),
            Some(ApiMethod::Options)
        );
    }

    #[test]
    fn rejects_methods_outside_the_set() {
        assert_eq!(ApiMethod::from_http(&Method::PATCH), None);
        assert_eq!(ApiMethod::from_http(&Method::HEAD), None);
        assert_eq!(ApiMethod::from_http(&Method::TRACE), None);
    }
}
