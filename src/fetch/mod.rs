//! Outbound JSON HTTP helpers.
//!
//! Thin wrappers over a shared `reqwest::Client`: uniform JSON headers and
//! uniform error signaling. A response at or above status 300 fails with
//! [`FetchError::Status`] carrying the raw, unconsumed response; anything
//! below is decoded as JSON. Redirects are not followed separately from any
//! other 3xx. No retries or timeouts here; policy belongs to the caller.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::error::ControllerError;

/// Errors from the outbound helpers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with status >= 300. Carries the unconsumed
    /// response so the caller can inspect headers or drain the body.
    #[error("request to {url} failed with status {status}")]
    Status {
        url: String,
        status: StatusCode,
        response: Response,
    },

    /// Transport or JSON-decode failure, passed through from the client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<FetchError> for ControllerError {
    fn from(err: FetchError) -> Self {
        ControllerError::internal(err)
    }
}

/// GET `url` and decode the JSON body.
pub async fn get<T>(url: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    request(Method::GET, url, None::<&()>).await
}

/// POST `data` as JSON to `url` and decode the JSON body.
pub async fn post<T, B>(url: &str, data: &B) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    request(Method::POST, url, Some(data)).await
}

/// PUT `data` as JSON to `url` and decode the JSON body.
pub async fn put<T, B>(url: &str, data: &B) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    request(Method::PUT, url, Some(data)).await
}

/// Shared implementation behind the verb helpers.
async fn request<T, B>(method: Method, url: &str, body: Option<&B>) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let mut builder = client().request(method, url).headers(json_headers());
    if let Some(body) = body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    if status.as_u16() >= 300 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
            response,
        });
    }

    Ok(response.json().await?)
}

fn client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new)
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
