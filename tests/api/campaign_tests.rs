//! Campaign API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{id_of, TestApp};

async fn create_campaign(app: &TestApp, name: &str, kind: &str) -> i64 {
    let response = app
        .server
        .post("/api/v1/campaigns")
        .json(&json!({
            "name": name,
            "startDate": "2026-03-01",
            "endDate": "2026-03-31",
            "type": kind,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    id_of(&response.json::<Value>(), "campaignID")
}

#[tokio::test]
async fn test_filter_by_type() {
    // Arrange
    let app = TestApp::new().await;
    create_campaign(&app, "Spring mailer", "EMAIL").await;
    create_campaign(&app, "Launch webinar", "WEBINAR").await;

    // Act
    let response = app
        .server
        .get("/api/v1/campaigns")
        .add_query_param("type", "EMAIL")
        .await;

    // Assert
    response.assert_status_ok();
    let campaigns: Vec<Value> = response.json();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0]["name"], "Spring mailer");
}

#[tokio::test]
async fn test_unknown_type_filter_returns_400() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/v1/campaigns")
        .add_query_param("type", "CARRIER_PIGEON")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10003);
}

#[tokio::test]
async fn test_end_before_start_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/campaigns")
        .json(&json!({
            "name": "Backwards",
            "startDate": "2026-03-31",
            "endDate": "2026-03-01",
            "type": "SMS",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_interactions() {
    let app = TestApp::new().await;
    let campaign_id = create_campaign(&app, "Expo", "EVENT").await;
    let path = format!("/api/v1/campaigns/{}/interactions", campaign_id);

    let once = app.server.post(&path).await;
    once.assert_status_ok();
    assert_eq!(once.json::<Value>()["customerInteractions"], 1);

    let more = app.server.post(&path).json(&json!({ "count": 4 })).await;
    more.assert_status_ok();
    assert_eq!(more.json::<Value>()["customerInteractions"], 5);

    app.server
        .post(&path)
        .json(&json!({ "count": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_campaign() {
    let app = TestApp::new().await;
    let campaign_id = create_campaign(&app, "Short lived", "SOCIAL_MEDIA").await;
    let path = format!("/api/v1/campaigns/{}", campaign_id);

    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}
