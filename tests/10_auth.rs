mod common;

use anyhow::Result;
use axum::http::StatusCode;
use blog_api::auth::TokenCodec;
use serde_json::json;

#[tokio::test]
async fn create_without_token_is_unauthorized() -> Result<()> {
    let app = common::offline_app();

    let req = common::json_request(
        "POST",
        "/posts/",
        json!({
            "title": "No token",
            "content": "This post should not be created.",
            "published": true
        }),
    );
    let (status, body) = common::send(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing authorization credentials.");
    Ok(())
}

#[tokio::test]
async fn delete_without_token_is_unauthorized() -> Result<()> {
    let app = common::offline_app();

    let (status, _body) = common::send(app, common::request("DELETE", "/posts/1")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() -> Result<()> {
    let app = common::offline_app();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/posts/")
        .header("content-type", "application/json")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::from(
            json!({"title": "t", "content": "c"}).to_string(),
        ))?;
    let (status, body) = common::send(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid authentication scheme.");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let app = common::offline_app();

    let req = common::authed_json_request(
        "POST",
        "/posts/",
        "not-a-jwt",
        json!({"title": "t", "content": "c"}),
    );
    let (status, body) = common::send(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token.");
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() -> Result<()> {
    let app = common::offline_app();
    let foreign = TokenCodec::new(b"some-other-secret", 1800).issue(42)?;

    let req = common::authed_json_request("POST", "/posts/", &foreign, json!({"title": "t", "content": "c"}));
    let (status, _body) = common::send(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let app = common::offline_app();
    let expired = TokenCodec::new(common::TEST_SECRET.as_bytes(), -60).issue(42)?;

    let req = common::authed_json_request("POST", "/posts/", &expired, json!({"title": "t", "content": "c"}));
    let (status, body) = common::send(app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token.");
    Ok(())
}

#[tokio::test]
async fn login_issues_token_accepted_by_guard() -> Result<()> {
    let app = common::offline_app();

    let (status, body) = common::send(
        app.clone(),
        common::json_request("POST", "/auth/login", json!({"user_id": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().expect("access_token").to_string();

    // A schema-violating body proves the request got past the guard: the
    // rejection comes from validation (422), not authentication (401).
    let req = common::authed_json_request("POST", "/posts/", &token, json!({"content": "no title"}));
    let (status, _body) = common::send(app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
