//! Order API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_user_places_order_at_certificate_price() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("buyer").await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 150, &[]).await;

    let (status, body) = app
        .post_auth(&format!("/orders?certificateId={}", certificate_id), &user.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userId"], user.id);
    assert_eq!(body["certificateId"], certificate_id);
    assert_eq!(body["cost"], 150);
    assert!(body["purchaseDate"].is_string());
    assert_eq!(
        body["_links"]["userOrders"]["href"],
        format!("http://localhost:8080/users/{}/orders", user.id)
    );
    assert_eq!(app.store.order_count(), 1);
}

#[tokio::test]
async fn test_cost_is_fixed_at_purchase_time() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("buyer").await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 150, &[]).await;
    let (_, order) = app
        .post_auth(&format!("/orders?certificateId={}", certificate_id), &user.token)
        .await;

    app.patch_json_auth(
        &format!("/certificates/{}", certificate_id),
        serde_json::json!({ "price": 999 }),
        &admin.token,
    )
    .await;

    let (_, body) = app
        .get_auth(&format!("/orders/{}", order["id"]), &user.token)
        .await;
    assert_eq!(body["cost"], 150);
}

#[tokio::test]
async fn test_order_for_unknown_certificate_is_invalid() {
    let app = TestApp::new().await;
    let user = app.user("buyer").await;

    let (status, body) = app.post_auth("/orders?certificateId=404", &user.token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40004);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_order_requires_certificate_id() {
    let app = TestApp::new().await;
    let user = app.user("buyer").await;

    let (status, _) = app.post_auth("/orders", &user.token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guest_cannot_order() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(axum::http::Method::POST, "/orders?certificateId=1", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owner_and_admin_read_order_others_cannot() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let owner = app.user("owner").await;
    let other = app.user("other").await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 150, &[]).await;
    let (_, order) = app
        .post_auth(&format!("/orders?certificateId={}", certificate_id), &owner.token)
        .await;
    let uri = format!("/orders/{}", order["id"]);

    let (status, _) = app.get_auth(&uri, &owner.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get_auth(&uri, &admin.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get_auth(&uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 40300);
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let app = TestApp::new().await;
    let user = app.user("buyer").await;

    let (status, body) = app.get_auth("/orders/31337", &user.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40404);
}

#[tokio::test]
async fn test_listing_all_orders_is_admin_only() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("buyer").await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 150, &[]).await;
    for _ in 0..3 {
        app.post_auth(&format!("/orders?certificateId={}", certificate_id), &user.token)
            .await;
    }

    let (status, _) = app.get_auth("/orders", &user.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get_auth("/orders?size=2", &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["totalElements"], 3);
    assert_eq!(body["_embedded"]["orders"].as_array().unwrap().len(), 2);
    assert_eq!(body["_embedded"]["orders"][0]["id"], 1);
}
