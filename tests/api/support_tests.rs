//! Support Ticket API Tests

use std::collections::HashMap;

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{id_of, unique_email, TestApp};

async fn create_ticket(app: &TestApp, customer_id: i64, subject: &str) -> i64 {
    let response = app
        .server
        .post("/api/v1/tickets")
        .json(&json!({ "customerID": customer_id, "subject": subject }))
        .await;
    response.assert_status(StatusCode::CREATED);
    id_of(&response.json::<Value>(), "ticketID")
}

#[tokio::test]
async fn test_new_ticket_defaults_to_open() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Frances", &unique_email()).await;

    let ticket_id = create_ticket(&app, customer_id, "Cannot log in").await;
    let response = app.server.get(&format!("/api/v1/tickets/{}", ticket_id)).await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "OPEN");
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_ticket_for_unknown_customer_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/tickets")
        .json(&json!({ "customerID": 5150, "subject": "Ghost" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_update_and_filter() {
    // Arrange
    let app = TestApp::new().await;
    let customer_id = app.create_customer("John", &unique_email()).await;
    let first = create_ticket(&app, customer_id, "Slow dashboard").await;
    create_ticket(&app, customer_id, "Typo on invoice").await;

    // Act
    let updated = app
        .server
        .put(&format!("/api/v1/tickets/{}/status", first))
        .json(&json!({ "status": "RESOLVED" }))
        .await;

    // Assert
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["status"], "RESOLVED");

    let resolved: Vec<Value> = app
        .server
        .get("/api/v1/tickets")
        .add_query_param("status", "RESOLVED")
        .await
        .json();
    assert_eq!(resolved.len(), 1);
    assert_eq!(id_of(&resolved[0], "ticketID"), first);
}

#[tokio::test]
async fn test_unknown_status_query_returns_400() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/v1/tickets")
        .add_query_param("status", "ESCALATED")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10003);
}

#[tokio::test]
async fn test_customer_service_failure_returns_502() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/77"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;
    let app = TestApp::with_registry(HashMap::from([(
        "customer-service".to_string(),
        upstream.uri(),
    )]))
    .await;

    let response = app
        .server
        .post("/api/v1/tickets")
        .json(&json!({ "customerID": 77, "subject": "Upstream down" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}
