//! Outbound fetch helper tests against a mock JSON endpoint.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use apikit::fetch::{self, FetchError};

mod common;

#[tokio::test]
async fn get_succeeds_below_the_300_boundary() {
    let addr: SocketAddr = "127.0.0.1:28611".parse().unwrap();
    common::start_json_backend(addr, |_request| async move {
        (299, json!({"edge": "case"}).to_string())
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let value: Value = fetch::get(&format!("http://{addr}/items")).await.unwrap();
    assert_eq!(value, json!({"edge": "case"}));
}

#[tokio::test]
async fn get_fails_at_exactly_300() {
    let addr: SocketAddr = "127.0.0.1:28612".parse().unwrap();
    common::start_json_backend(addr, |_request| async move {
        (300, json!({"ok": false}).to_string())
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let url = format!("http://{addr}/items");
    let err = fetch::get::<Value>(&url).await.unwrap_err();
    match err {
        FetchError::Status {
            url: failed_url,
            status,
            response,
        } => {
            assert_eq!(failed_url, url);
            assert_eq!(status.as_u16(), 300);
            assert_eq!(response.status().as_u16(), 300);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn post_sends_json_and_decodes_the_echo() {
    let addr: SocketAddr = "127.0.0.1:28613".parse().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let capture = seen.clone();
    common::start_json_backend(addr, move |request| {
        let capture = capture.clone();
        async move {
            let body = request
                .split_once("\r\n\r\n")
                .map(|(_, body)| body.to_string())
                .unwrap_or_default();
            capture.lock().unwrap().push(request);
            (200, body)
        }
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let payload = json!({"name": "widget", "count": 3});
    let echoed: Value = fetch::post(&format!("http://{addr}/items"), &payload)
        .await
        .unwrap();
    assert_eq!(echoed, payload);

    let requests = seen.lock().unwrap();
    assert!(requests[0].starts_with("POST /items"));
    assert!(requests[0].to_ascii_lowercase().contains("content-type: application/json"));
    assert!(requests[0].to_ascii_lowercase().contains("accept: application/json"));
}

#[tokio::test]
async fn put_sends_json_and_decodes_the_echo() {
    let addr: SocketAddr = "127.0.0.1:28614".parse().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let capture = seen.clone();
    common::start_json_backend(addr, move |request| {
        let capture = capture.clone();
        async move {
            let body = request
                .split_once("\r\n\r\n")
                .map(|(_, body)| body.to_string())
                .unwrap_or_default();
            capture.lock().unwrap().push(request);
            (200, body)
        }
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let payload = json!({"name": "gadget"});
    let echoed: Value = fetch::put(&format!("http://{addr}/items/1"), &payload)
        .await
        .unwrap();
    assert_eq!(echoed, payload);

    let requests = seen.lock().unwrap();
    assert!(requests[0].starts_with("PUT /items/1"));
}

#[tokio::test]
async fn invalid_json_body_propagates_as_http_error() {
    let addr: SocketAddr = "127.0.0.1:28615".parse().unwrap();
    common::start_json_backend(addr, |_request| async move {
        (200, "this is not json".to_string())
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = fetch::get::<Value>(&format!("http://{addr}/items"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}
