#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use blog_api::auth::TokenCodec;
use blog_api::config::DatabaseConfig;
use blog_api::database::manager;
use blog_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET.as_bytes(), 1800)
}

pub fn bearer_token() -> String {
    codec().issue(42).expect("issue token")
}

/// Router backed by a lazily-connected pool. Requests rejected before the
/// store is touched (auth and body validation) need no running database.
pub fn offline_app() -> Router {
    let pool = manager::connect_lazy(
        "postgres://postgres@127.0.0.1:1/blog_offline",
        &DatabaseConfig {
            max_connections: 2,
            connect_timeout_secs: 1,
        },
    )
    .expect("lazy pool");

    app(AppState {
        pool,
        tokens: Arc::new(codec()),
    })
}

/// Router against the real database named by `url`, with migrations applied.
pub async fn connected_app(url: &str) -> Result<Router> {
    let pool = manager::connect_to(
        url,
        &DatabaseConfig {
            max_connections: 5,
            connect_timeout_secs: 5,
        },
    )
    .await?;
    manager::migrate(&pool).await?;

    Ok(app(AppState {
        pool,
        tokens: Arc::new(codec()),
    }))
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("request")
}

/// Drive one request through the router and decode the JSON body (Null for
/// empty bodies such as 204 responses).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("infallible");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, body)
}
