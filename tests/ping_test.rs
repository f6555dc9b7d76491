//! Health check endpoint tests.
//!
//! `/ping` must answer regardless of how the relay is configured.

use axum::{body::Body, http::Request, http::StatusCode};
use chat_relay::{config::Config, create_app};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn get(uri: &str, config: &Config) -> (StatusCode, Vec<u8>) {
    let app = create_app(config).expect("failed to create app");
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.expect("failed to make request");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, body.to_vec())
}

#[tokio::test]
async fn ping_returns_pong() {
    let (status, body) = get("/ping", &Config::default()).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).expect("ping response should be JSON");
    assert_eq!(body, json!({ "message": "pong" }));
}

#[tokio::test]
async fn ping_ignores_relay_configuration() {
    let mut config = Config::default();
    config.relay.upstream_base_url = "http://127.0.0.1:9/unused".to_string();
    config.relay.error_notif_url = Some("not a url".to_string());

    let (status, body) = get("/ping", &config).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "pong");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get("/does-not-exist", &Config::default()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
