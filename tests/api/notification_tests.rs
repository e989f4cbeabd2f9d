//! Notification API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_created_notifications_start_pending() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/notifications")
        .json(&json!({
            "customerID": 7,
            "message": "Welcome",
            "type": "SMS",
            "status": "SENT",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert_eq!(json["status"], "PENDING");
    assert!(json["sentAt"].is_null());
}

#[tokio::test]
async fn test_send_to_existing_customer_marks_sent() {
    // Arrange
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Margaret", &unique_email()).await;
    let notification_id = app.create_notification(customer_id, "Your order shipped").await;

    // Act
    let response = app
        .server
        .post(&format!("/api/v1/notifications/{}/send", notification_id))
        .await;

    // Assert
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "SENT");
    assert!(json["sentAt"].is_string());
}

#[tokio::test]
async fn test_send_to_missing_customer_marks_failed() {
    let app = TestApp::new().await;
    let notification_id = app.create_notification(999_999, "Nobody home").await;

    let response = app
        .server
        .post(&format!("/api/v1/notifications/{}/send", notification_id))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "FAILED");
}

#[tokio::test]
async fn test_send_twice_returns_409() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Barbara", &unique_email()).await;
    let notification_id = app.create_notification(customer_id, "Once only").await;
    let path = format!("/api/v1/notifications/{}/send", notification_id);

    app.server.post(&path).await.assert_status_ok();
    let again = app.server.post(&path).await;

    again.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_notification_id_returns_409() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Frances", &unique_email()).await;
    let body = json!({
        "notificationID": 4242,
        "customerID": customer_id,
        "message": "First",
        "type": "SMS",
    });

    app.server
        .post("/api/v1/notifications")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
    let again = app.server.post("/api/v1/notifications").json(&body).await;

    again.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_dispatch_pending() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Edsger", &unique_email()).await;
    app.create_notification(customer_id, "first").await;
    app.create_notification(customer_id, "second").await;
    app.create_notification(123_456, "orphan").await;

    let response = app.server.post("/api/v1/notifications/dispatch").await;

    response.assert_status_ok();
    let summary: Value = response.json();
    assert_eq!(summary["sent"], 2);
    assert_eq!(summary["failed"], 1);

    let pending = app
        .server
        .get("/api/v1/notifications")
        .add_query_param("status", "PENDING")
        .await;
    assert!(pending.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_filter_by_customer_and_status() {
    let app = TestApp::new().await;
    app.create_notification(1, "for one").await;
    app.create_notification(2, "for two").await;

    let by_customer = app
        .server
        .get("/api/v1/notifications")
        .add_query_param("customerId", 1)
        .await;
    by_customer.assert_status_ok();
    let list: Vec<Value> = by_customer.json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["message"], "for one");

    app.server
        .get("/api/v1/notifications")
        .add_query_param("status", "LOST")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
