//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_user_reads_own_profile() {
    let app = TestApp::new().await;
    let user = app.user("self_reader").await;

    let (status, body) = app
        .get_auth(&format!("/users/{}", user.id), &user.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "self_reader");
    assert_eq!(body["role"], "user");
    assert!(body["createdAt"].is_string());
    assert!(body.get("password_hash").is_none());
    assert_eq!(
        body["_links"]["orders"]["href"],
        format!("http://localhost:8080/users/{}/orders", user.id)
    );
}

#[tokio::test]
async fn test_user_cannot_read_other_profile() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob_user").await;

    let (status, _) = app
        .get_auth(&format!("/users/{}", bob.id), &alice.token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_reads_any_profile_and_lists_users() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("listed_user").await;

    let (status, _) = app
        .get_auth(&format!("/users/{}", user.id), &admin.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get_auth("/users", &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["totalElements"], 2);
    assert_eq!(body["_embedded"]["users"][0]["role"], "admin");

    let (status, _) = app.get_auth("/users", &user.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_reads_missing_user() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app.get_auth("/users/500", &admin.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40403);
}

#[tokio::test]
async fn test_user_orders_history() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("history").await;
    let other = app.user("nosy_user").await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 150, &[]).await;
    app.post_auth(&format!("/orders?certificateId={}", certificate_id), &user.token)
        .await;
    app.post_auth(&format!("/orders?certificateId={}", certificate_id), &other.token)
        .await;

    let uri = format!("/users/{}/orders", user.id);
    let (status, body) = app.get_auth(&uri, &user.token).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["_embedded"]["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["userId"], user.id);

    let (status, _) = app.get_auth(&uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get_auth("/users/500/orders", &admin.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40403);
}
