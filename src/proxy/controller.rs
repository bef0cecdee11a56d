//! Passthrough handlers for the `/items` collection.

use std::time::Duration;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{ApiContext, ApiDispatcher, ControllerError, HandlerBuilder, TypedSchema};
use crate::fetch::{self, FetchError};

/// Paging parameters for list requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging {
    /// Opaque continuation token from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    50
}

/// Payload for create and replace operations, forwarded untouched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub attributes: Value,
}

/// Replace request: target id plus the new payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemUpdate {
    pub id: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

/// Builds the dispatcher for the upstream passthrough endpoints.
pub struct ProxyController {
    upstream: String,
}

impl ProxyController {
    /// Create a controller forwarding to `upstream` (trailing slashes
    /// stripped).
    pub fn new(upstream: impl Into<String>) -> Self {
        let mut upstream = upstream.into();
        while upstream.ends_with('/') {
            upstream.pop();
        }
        Self { upstream }
    }

    /// Register the passthrough handlers and build the dispatcher.
    pub fn dispatcher(&self) -> ApiDispatcher {
        let list_base = self.upstream.clone();
        let create_base = self.upstream.clone();
        let replace_base = self.upstream.clone();

        HandlerBuilder::new()
            .get(
                TypedSchema::<Paging>::new(),
                move |ctx: ApiContext<Paging>| {
                    let base = list_base.clone();
                    async move { list_items(&base, ctx.input).await }
                },
            )
            .post(
                TypedSchema::<ItemPayload>::new(),
                move |ctx: ApiContext<ItemPayload>| {
                    let base = create_base.clone();
                    async move { create_item(&base, ctx.input).await }
                },
            )
            .put(
                TypedSchema::<ItemUpdate>::new(),
                move |ctx: ApiContext<ItemUpdate>| {
                    let base = replace_base.clone();
                    async move { replace_item(&base, ctx.input).await }
                },
            )
            .build()
    }
}

async fn list_items(base: &str, paging: Paging) -> Result<Response, ControllerError> {
    let mut url = format!("{}/items?limit={}", base, paging.limit);
    if let Some(cursor) = &paging.cursor {
        let encoded: String = url::form_urlencoded::byte_serialize(cursor.as_bytes()).collect();
        url.push_str("&cursor=");
        url.push_str(&encoded);
    }

    let items: Value = fetch::get(&url).await.map_err(map_upstream)?;
    Ok(Json(items).into_response())
}

async fn create_item(base: &str, payload: ItemPayload) -> Result<Response, ControllerError> {
    let url = format!("{}/items", base);
    let created: Value = fetch::post(&url, &payload).await.map_err(map_upstream)?;
    Ok(Json(created).into_response())
}

async fn replace_item(base: &str, update: ItemUpdate) -> Result<Response, ControllerError> {
    let encoded: String = url::form_urlencoded::byte_serialize(update.id.as_bytes()).collect();
    let url = format!("{}/items/{}", base, encoded);
    let replaced: Value = fetch::put(&url, &update.payload).await.map_err(map_upstream)?;
    Ok(Json(replaced).into_response())
}

/// Upstream 404 becomes this controller's own not-found; anything else is an
/// unclassified failure.
fn map_upstream(err: FetchError) -> ControllerError {
    match err {
        FetchError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND => {
            ControllerError::NotFound
        }
        other => ControllerError::internal(other),
    }
}

/// Assemble the Axum router: the dispatcher mounted on `/items` plus the
/// standard middleware stack.
pub fn router(upstream: impl Into<String>, request_timeout: Duration) -> Router {
    let dispatcher = ProxyController::new(upstream).dispatcher();

    Router::new()
        .route("/items", dispatcher.into_route())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let controller = ProxyController::new("http://127.0.0.1:9000///");
        assert_eq!(controller.upstream, "http://127.0.0.1:9000");
    }

    #[test]
    fn upstream_not_found_maps_to_controller_not_found() {
        let response = reqwest::Response::from(
            axum::http::Response::builder()
                .status(404)
                .body("")
                .unwrap(),
        );
        let err = map_upstream(FetchError::Status {
            url: "http://upstream/items".into(),
            status: reqwest::StatusCode::NOT_FOUND,
            response,
        });
        assert!(matches!(err, ControllerError::NotFound));
    }

    #[test]
    fn transport_errors_stay_unclassified() {
        let err = map_upstream(FetchError::Http(reqwest_error()));
        assert!(matches!(err, ControllerError::Internal(_)));
    }

    fn reqwest_error() -> reqwest::Error {
        // Force a builder error with an invalid URL.
        reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
    }
}
