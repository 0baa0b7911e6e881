#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use fansite_api::config::ServerConfig;
use fansite_api::router::build_app_router;
use fansite_api::state::AppState;
use fansite_db::store::MemoryStore;
use fansite_db::{Store, StoreBackend};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "let-me-in";

/// Build a test `ServerConfig` with safe defaults and the admin gate open.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        admin_password: None,
        store: StoreBackend::Memory,
        store_fallback: false,
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(MemoryStore::new()), test_config())
}

/// Build the application router with `ADMIN_PASSWORD` configured.
pub fn build_guarded_app() -> Router {
    let mut config = test_config();
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    build_app_with(Arc::new(MemoryStore::new()), config)
}

/// Build the application router over `store`, so tests can inspect it.
pub fn build_app_with(store: Store, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, None)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, None)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_as_admin(
    app: Router,
    uri: &str,
    body: Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn delete_as_admin(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a vote carrying `visitor` in the `X-Visitor-Token` header.
pub async fn vote_as(app: Router, id: &str, vote_type: &str, visitor: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/fanart/{id}/vote"))
        .header("content-type", "application/json")
        .header("x-visitor-token", visitor)
        .body(Body::from(serde_json::json!({ "voteType": vote_type }).to_string()))
        .unwrap();
    send(app, request).await
}
