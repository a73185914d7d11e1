//! Video metadata API integration tests.
//!
//! Run with: `cargo test -p tubely-api --test videos_test`

mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use helpers::{create_video, setup_test_app, setup_test_app_with, token_for};
use serde_json::Value;
use tubely_core::models::Video;
use tubely_processing::testing::{FakeOptimizer, FakeProber};
use uuid::Uuid;

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let id = create_video(&app, owner, "Boots").await;

    let response = app.client().get(&format!("/videos/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["user_id"], owner.to_string());
    assert_eq!(body["title"], "Boots");
    assert!(body["video_url"].is_null());
    assert!(body["thumbnail_url"].is_null());
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/videos")
        .json(&serde_json::json!({ "title": "no auth" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["recoverable"], false);

    let response = app
        .client()
        .post("/videos")
        .authorization_bearer("not-a-jwt")
        .json(&serde_json::json!({ "title": "bad auth" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/videos")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&serde_json::json!({ "title": "  " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.videos.is_empty().await);
}

#[tokio::test]
async fn test_create_rejects_overlong_title() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/videos")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&serde_json::json!({ "title": "x".repeat(256) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.videos.is_empty().await);
}

#[tokio::test]
async fn test_get_invalid_id_is_bad_request() {
    let app = setup_test_app().await;

    let response = app.client().get("/videos/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/videos/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .get(&format!("/videos/{}", Uuid::new_v4()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["details"].is_string());

    let app = setup_test_app_with(FakeProber::new(1920, 1080), FakeOptimizer::new(), |config| {
        config.base.environment = "production".to_string();
    })
    .await;
    let response = app
        .client()
        .get(&format!("/videos/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_list_returns_only_callers_videos_newest_first() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let first = create_video(&app, owner, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_video(&app, owner, "second").await;
    create_video(&app, Uuid::new_v4(), "someone else's").await;

    let response = app
        .client()
        .get("/videos")
        .authorization_bearer(token_for(owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Vec<Value> = response.json();
    let ids: Vec<String> = body
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![second.to_string(), first.to_string()]);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let id = create_video(&app, owner, "short-lived").await;

    let response = app
        .client()
        .delete(&format!("/videos/{}", id))
        .authorization_bearer(token_for(owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app.client().get(&format!("/videos/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_checks_existence_and_ownership() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let id = create_video(&app, owner, "guarded").await;

    let response = app
        .client()
        .delete(&format!("/videos/{}", id))
        .authorization_bearer(token_for(Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .client()
        .delete(&format!("/videos/{}", Uuid::new_v4()))
        .authorization_bearer(token_for(owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.client().get(&format!("/videos/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_plain_url_is_returned_unchanged() {
    let app = setup_test_app().await;
    let now = Utc::now();
    let plain = "https://cdn.example.com/landscape/legacy.mp4";
    let video = Video {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        title: "legacy".to_string(),
        description: String::new(),
        thumbnail_url: None,
        video_url: Some(plain.to_string()),
        user_id: Uuid::new_v4(),
    };
    let id = video.id;
    app.videos.insert(video).await;

    let response = app.client().get(&format!("/videos/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["video_url"], plain);
}

#[tokio::test]
async fn test_malformed_descriptor_is_server_error() {
    let app = setup_test_app().await;
    let now = Utc::now();
    let video = Video {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        title: "broken".to_string(),
        description: String::new(),
        thumbnail_url: None,
        video_url: Some("a,b,c".to_string()),
        user_id: Uuid::new_v4(),
    };
    let id = video.id;
    app.videos.insert(video).await;

    let response = app.client().get(&format!("/videos/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "MALFORMED_URL_DESCRIPTOR");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/live").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");

    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["database"], "ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["paths"]["/videos/{id}/upload"].is_object());
}
