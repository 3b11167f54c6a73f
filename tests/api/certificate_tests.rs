//! Certificate API Tests

use std::time::Duration;

use axum::http::StatusCode;
use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

fn timestamp(certificate: &Value, field: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(certificate[field].as_str().unwrap()).unwrap()
}

/// Keep consecutive writes on distinct timestamps.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

fn tag_names(certificate: &Value) -> Vec<String> {
    certificate["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str().map(String::from))
        .collect()
}

fn names(page: &Value) -> Vec<String> {
    page["_embedded"]["certificates"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str().map(String::from))
        .collect()
}

#[tokio::test]
async fn test_create_certificate_reuses_and_creates_tags() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.post_json_auth("/tags", json!({ "name": "spa" }), &admin.token)
        .await;

    let (status, body) = app
        .post_json_auth(
            "/certificates",
            json!({
                "name": "Spa weekend",
                "description": "Two days of relaxation",
                "price": 150,
                "duration": 60,
                "tags": [{ "name": "spa" }, { "name": "relax" }, { "name": " spa " }],
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Spa weekend");
    assert_eq!(body["description"], "Two days of relaxation");
    assert_eq!(body["price"], 150);
    assert_eq!(body["duration"], 60);
    assert!(body["createDate"].is_string());
    assert!(body["lastUpdateDate"].is_string());
    assert_eq!(tag_names(&body), vec!["spa", "relax"]);
    assert_eq!(body["tags"][0]["id"], 1);

    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        body["_links"]["orders"]["href"],
        format!("http://localhost:8080/certificates/{}/orders", id)
    );

    let (_, tags) = app.get("/tags").await;
    assert_eq!(tags["page"]["totalElements"], 2);
}

#[tokio::test]
async fn test_invalid_certificate_rejected_before_persistence() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth(
            "/certificates",
            json!({
                "name": "Spa weekend",
                "description": "Two days of relaxation",
                "price": -5,
                "duration": 60,
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "price");

    let (_, list) = app.get("/certificates").await;
    assert_eq!(list["page"]["totalElements"], 0);
}

#[tokio::test]
async fn test_missing_required_field_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth(
            "/certificates",
            json!({ "description": "No name given here", "price": 10, "duration": 5 }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn test_invalid_nested_tag_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth(
            "/certificates",
            json!({
                "name": "Spa weekend",
                "description": "Two days of relaxation",
                "price": 10,
                "duration": 5,
                "tags": [{ "name": "ok_tag" }, { "name": "no!" }],
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "tags[1].name");
}

#[tokio::test]
async fn test_user_cannot_create_certificate() {
    let app = TestApp::new().await;
    let user = app.user("customer").await;

    let (status, _) = app
        .post_json_auth("/certificates", json!({}), &user.token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_is_ordered_by_id_with_page_links() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    for name in ["Charlie tour", "Alpha tour", "Bravo tour"] {
        app.certificate(&admin, name, 10, &[]).await;
    }

    let (status, body) = app.get("/certificates?size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Charlie tour", "Alpha tour"]);
    assert_eq!(body["page"]["totalPages"], 2);
    assert_eq!(
        body["_links"]["next"]["href"],
        "http://localhost:8080/certificates?page=2&size=2"
    );
    let items = body["_embedded"]["certificates"].as_array().unwrap();
    assert!(items[0].get("description").is_none());
    assert!(items[0]["_links"]["self"]["href"].is_string());
}

#[tokio::test]
async fn test_list_sorted_by_name_descending() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    for name in ["Charlie tour", "Alpha tour", "Bravo tour"] {
        app.certificate(&admin, name, 10, &[]).await;
    }

    let (status, body) = app.get("/certificates?sort=name,desc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Charlie tour", "Bravo tour", "Alpha tour"]);
    assert_eq!(
        body["_links"]["self"]["href"],
        "http://localhost:8080/certificates?sort=name%2Cdesc&page=1&size=10"
    );
}

#[tokio::test]
async fn test_unknown_sort_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/certificates?sort=price").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40000);
}

#[tokio::test]
async fn test_filter_by_all_tags_and_search() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.certificate(&admin, "Spa weekend", 100, &["spa", "relax"]).await;
    app.certificate(&admin, "Spa morning", 40, &["spa"]).await;
    app.certificate(&admin, "Kayak weekend", 80, &["water", "relax"]).await;

    let (_, body) = app.get("/certificates?tags=spa,relax").await;
    assert_eq!(names(&body), vec!["Spa weekend"]);

    let (_, body) = app.get("/certificates?search=WEEKEND").await;
    assert_eq!(names(&body), vec!["Spa weekend", "Kayak weekend"]);

    let (_, body) = app.get("/certificates?tags=relax&search=kayak").await;
    assert_eq!(names(&body), vec!["Kayak weekend"]);
}

#[tokio::test]
async fn test_get_missing_certificate() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/certificates/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40402);
}

#[tokio::test]
async fn test_certificate_tags_listing() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.certificate(&admin, "Spa weekend", 100, &["spa", "relax"]).await;

    let (status, body) = app.get(&format!("/certificates/{}/tags", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_embedded"]["tags"].as_array().unwrap().len(), 2);

    let (status, _) = app.get("/certificates/999/tags").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_replaces_certificate() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.certificate(&admin, "Spa weekend", 100, &["spa"]).await;
    let (_, original) = app.get(&format!("/certificates/{}", id)).await;
    tick().await;

    let (status, body) = app
        .put_json_auth(
            &format!("/certificates/{}", id),
            json!({
                "name": "Spa week",
                "description": "Seven days of relaxation",
                "price": 500,
                "duration": 90,
                "tags": [{ "name": "luxury" }],
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Spa week");
    assert_eq!(body["price"], 500);
    assert_eq!(tag_names(&body), vec!["luxury"]);
    assert_eq!(body["createDate"], original["createDate"]);
    assert!(timestamp(&body, "lastUpdateDate") > timestamp(&original, "lastUpdateDate"));
}

#[tokio::test]
async fn test_put_missing_certificate() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .put_json_auth(
            "/certificates/77",
            json!({
                "name": "Spa week",
                "description": "Seven days of relaxation",
                "price": 500,
                "duration": 90,
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40402);
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.certificate(&admin, "Spa weekend", 100, &["spa"]).await;
    let (_, original) = app.get(&format!("/certificates/{}", id)).await;
    tick().await;

    let (status, body) = app
        .patch_json_auth(
            &format!("/certificates/{}", id),
            json!({ "price": 120 }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 120);
    assert_eq!(body["createDate"], original["createDate"]);
    assert!(timestamp(&body, "lastUpdateDate") > timestamp(&original, "lastUpdateDate"));
    assert_eq!(body["name"], "Spa weekend");
    assert_eq!(tag_names(&body), vec!["spa"]);

    let (status, body) = app
        .patch_json_auth(
            &format!("/certificates/{}", id),
            json!({ "tags": [] }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_delete_certificate() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.certificate(&admin, "Spa weekend", 100, &[]).await;

    let (status, _) = app
        .delete_auth(&format!("/certificates/{}", id), &admin.token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/certificates/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .delete_auth(&format!("/certificates/{}", id), &admin.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ordered_certificate_cannot_be_deleted() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("buyer").await;
    let id = app.certificate(&admin, "Spa weekend", 100, &[]).await;
    app.post_auth(&format!("/orders?certificateId={}", id), &user.token)
        .await;

    let (status, body) = app
        .delete_auth(&format!("/certificates/{}", id), &admin.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40002);
}

#[tokio::test]
async fn test_certificate_orders_admin_only() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.user("buyer").await;
    let id = app.certificate(&admin, "Spa weekend", 100, &[]).await;
    app.post_auth(&format!("/orders?certificateId={}", id), &user.token)
        .await;

    let (status, body) = app
        .get_auth(&format!("/certificates/{}/orders", id), &admin.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_embedded"]["orders"][0]["userId"], user.id);

    let (status, _) = app
        .get_auth(&format!("/certificates/{}/orders", id), &user.token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_padded_short_tag_name_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .post_json_auth(
            "/certificates",
            json!({
                "name": "Spa weekend",
                "description": "Two days of relaxation",
                "price": 10,
                "duration": 5,
                "tags": [{ "name": "  a " }],
            }),
            &admin.token,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "tags[0].name");

    let (_, tags) = app.get("/tags").await;
    assert_eq!(tags["page"]["totalElements"], 0);
}

#[tokio::test]
async fn test_padded_tag_name_matches_existing_tag() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.post_json_auth("/tags", json!({ "name": " spa " }), &admin.token)
        .await;

    let id = app.certificate(&admin, "Spa weekend", 100, &["  spa"]).await;

    let (_, body) = app.get(&format!("/certificates/{}", id)).await;
    assert_eq!(body["tags"], json!([{ "id": 1, "name": "spa" }]));

    let (_, tags) = app.get("/tags").await;
    assert_eq!(tags["page"]["totalElements"], 1);
}

#[tokio::test]
async fn test_tags_returned_in_id_order() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    for name in ["wine", "food"] {
        app.post_json_auth("/tags", json!({ "name": name }), &admin.token)
            .await;
    }

    let id = app.certificate(&admin, "Wine dinner", 90, &["food", "wine"]).await;
    let (_, created) = app
        .put_json_auth(
            &format!("/certificates/{}", id),
            json!({
                "name": "Wine dinner",
                "description": "Four courses with pairings",
                "price": 90,
                "duration": 30,
                "tags": [{ "name": "food" }, { "name": "wine" }],
            }),
            &admin.token,
        )
        .await;
    let (_, fetched) = app.get(&format!("/certificates/{}", id)).await;

    assert_eq!(tag_names(&created), vec!["wine", "food"]);
    assert_eq!(created["tags"], fetched["tags"]);
}
