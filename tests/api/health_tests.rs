//! Health Check API Tests

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

use crate::common::TestApp;

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    // Arrange
    let app = TestApp::new().await;

    // Act
    let response = app.server.get("/health").await;

    // Assert
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

/// Liveness never depends on the store
#[tokio::test]
async fn test_liveness_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

/// Readiness reports the in-memory store and the known services
#[tokio::test]
async fn test_readiness_check_lists_services() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/ready").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "healthy");

    let services = json["checks"]["services"].as_array().unwrap();
    assert!(services.iter().any(|s| s == "customer-service"));
    assert!(services.iter().any(|s| s == "notification-service"));
}

/// Every response carries a request id, echoed when supplied
#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::new().await;

    let generated = app.server.get("/health").await;
    assert!(!generated.header("x-request-id").is_empty());

    let echoed = app
        .server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(echoed.header("x-request-id"), "req-123");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_http_counters() {
    let app = TestApp::new().await;
    app.server.get("/health").await.assert_status_ok();

    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("crm_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/nothing-here").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
