//! Authentication API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_register_with_valid_data() {
    let app = TestApp::new().await;
    let name = unique_name();

    let (status, body) = app
        .post_json(
            "/auth/register",
            json!({ "name": name, "password": "ValidPassword123" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], name.as_str());
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_with_taken_name_fails() {
    let app = TestApp::new().await;
    let user = app.user("taken_name").await;

    let (status, body) = app
        .post_json(
            "/auth/register",
            json!({ "name": user.name, "password": "AnotherPassword1" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40003);
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/auth/register", json!({ "name": "shorty", "password": "short" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40006);
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_register_with_malformed_body_fails() {
    let app = TestApp::new().await;

    let (status, body) = app.post_json("/auth/register", json!({ "name": 42 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].is_number());
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = TestApp::new().await;
    let user = app.user("login_user").await;

    let (status, body) = app
        .post_json(
            "/auth/login",
            json!({ "name": user.name, "password": USER_PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["expires_in"].as_i64().is_some_and(|s| s > 0));

    let token = body["access_token"].as_str().unwrap();
    let (status, _) = app.get_auth(&format!("/users/{}", user.id), token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new().await;
    let user = app.user("wrong_password").await;

    let (status, body) = app
        .post_json(
            "/auth/login",
            json!({ "name": user.name, "password": "not-the-password" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40101);
}

#[tokio::test]
async fn test_login_with_unknown_user_fails() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/auth/login", json!({ "name": "nobody", "password": "whatever1" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40101);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/orders").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40100);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::new().await;

    let (status, _) = app.get_auth("/orders", "not.a.jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
