#![allow(dead_code)]

use std::sync::Arc;

use aquafarm_core::store::memory::MemoryStore;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use aquafarm_api::router::build_app_router;
use aquafarm_api::config::ServerConfig;
use aquafarm_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
        db_reset_on_start: false,
    }
}

/// Build the production router over an in-memory store.
///
/// The store handle is returned so tests can inspect audit rows or take the
/// store offline.
pub fn build_test_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), test_config());
    (store, build_app_router(state))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create a farm through the API and return its id.
pub async fn create_farm(app: &Router, name: &str) -> String {
    let response = post_json(app, "/api/farms", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a pond through the API and return its id.
pub async fn create_pond(app: &Router, name: &str, farm_id: &str) -> String {
    let response = post_json(
        app,
        "/api/ponds",
        serde_json::json!({ "name": name, "farm_id": farm_id }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
