//! Tag API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_admin_creates_tag_with_links() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "spa" }), &admin.token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "spa");
    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        body["_links"]["self"]["href"],
        format!("http://localhost:8080/tags/{}", id)
    );
    assert_eq!(
        body["_links"]["certificatesAssignedToTag"]["href"],
        format!("http://localhost:8080/tags/{}/certificates", id)
    );
}

#[tokio::test]
async fn test_user_cannot_create_tag() {
    let app = TestApp::new().await;
    let user = app.user("plain_user").await;

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "spa" }), &user.token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 40300);
}

#[tokio::test]
async fn test_guest_cannot_create_tag() {
    let app = TestApp::new().await;

    let (status, _) = app.post_json("/tags", json!({ "name": "spa" })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_tag_is_invalid() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.post_json_auth("/tags", json!({ "name": "spa" }), &admin.token)
        .await;

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "spa" }), &admin.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40001);
}

#[tokio::test]
async fn test_blank_tag_name_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "   " }), &admin.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn test_guest_lists_tags_page_by_page() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    for name in ["spa", "food", "wine"] {
        app.post_json_auth("/tags", json!({ "name": name }), &admin.token)
            .await;
    }

    let (status, body) = app.get("/tags?page=2&size=2").await;

    assert_eq!(status, StatusCode::OK);
    let tags = body["_embedded"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "wine");
    assert_eq!(
        body["page"],
        json!({ "size": 2, "totalElements": 3, "totalPages": 2, "number": 2 })
    );
    assert_eq!(
        body["_links"]["prev"]["href"],
        "http://localhost:8080/tags?page=1&size=2"
    );
    assert!(body["_links"].get("next").is_none());
}

#[tokio::test]
async fn test_empty_listing_keeps_embedded_key() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/tags").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_embedded"]["tags"], json!([]));
    assert_eq!(body["page"]["totalPages"], 0);
    assert_eq!(
        body["_links"]["last"]["href"],
        "http://localhost:8080/tags?page=1&size=10"
    );
}

#[tokio::test]
async fn test_invalid_page_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/tags?page=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40005);
}

#[tokio::test]
async fn test_get_missing_tag() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/tags/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);
}

#[tokio::test]
async fn test_non_numeric_tag_id_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/tags/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_tag_detaches_it_from_certificates() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let certificate_id = app.certificate(&admin, "Spa weekend", 100, &["spa", "relax"]).await;
    let (_, tag) = app.get("/tags/1").await;
    assert_eq!(tag["name"], "spa");

    let (status, _) = app.delete_auth("/tags/1", &admin.token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, certificate) = app.get(&format!("/certificates/{}", certificate_id)).await;
    let names: Vec<&str> = certificate["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["relax"]);

    let (status, _) = app.delete_auth("/tags/1", &admin.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_certificates_of_tag() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.certificate(&admin, "Spa weekend", 100, &["spa"]).await;
    app.certificate(&admin, "Kayak tour", 50, &["water"]).await;

    let (status, body) = app.get("/tags/1/certificates").await;

    assert_eq!(status, StatusCode::OK);
    let certificates = body["_embedded"]["certificates"].as_array().unwrap();
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0]["name"], "Spa weekend");

    let (status, body) = app.get("/tags/999/certificates").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);
}

#[tokio::test]
async fn test_most_used_tag_of_top_spender() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let cheap = app.certificate(&admin, "City walk", 10, &["outdoor"]).await;
    let pricey = app.certificate(&admin, "Wine tasting", 300, &["wine", "food"]).await;
    let dinner = app.certificate(&admin, "Gourmet dinner", 200, &["food"]).await;

    let small = app.user("small_spender").await;
    let big = app.user("big_spender").await;
    for _ in 0..3 {
        app.post_auth(&format!("/orders?certificateId={}", cheap), &small.token)
            .await;
    }
    app.post_auth(&format!("/orders?certificateId={}", pricey), &big.token)
        .await;
    app.post_auth(&format!("/orders?certificateId={}", dinner), &big.token)
        .await;

    let (status, body) = app.get_auth("/tags/most-used", &admin.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "food");

    let (status, _) = app.get_auth("/tags/most-used", &big.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_most_used_tag_without_orders() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app.get_auth("/tags/most-used", &admin.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);
}

#[tokio::test]
async fn test_tag_name_is_trimmed_before_storage() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": " spa " }), &admin.token)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "spa");

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "spa" }), &admin.token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40001);

    let (status, body) = app
        .post_json_auth("/tags", json!({ "name": "  ab  " }), &admin.token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}
