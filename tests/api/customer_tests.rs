//! Customer API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{id_of, unique_email, TestApp};

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    // Arrange
    let app = TestApp::new().await;
    let email = unique_email();

    // Act
    let created = app
        .server
        .post("/api/v1/customers")
        .json(&json!({
            "customerID": null,
            "name": "Ada Lovelace",
            "emailId": email,
            "phoneNumber": "+15550100",
            "purchaseHistory": ["laptop"],
            "segmentationData": ["enterprise"],
        }))
        .await;

    // Assert
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    let customer_id = id_of(&created, "customerID");
    assert!(customer_id > 0);

    let fetched = app
        .server
        .get(&format!("/api/v1/customers/{}", customer_id))
        .await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>(), created);
    assert_eq!(created["emailId"], email.as_str());
    assert_eq!(created["purchaseHistory"], json!(["laptop"]));
}

#[tokio::test]
async fn test_get_missing_customer_returns_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/customers/424242").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], 10001);
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/customers/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/customers")
        .json(&json!({ "name": "Bad", "emailId": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_every_invalid_field_is_reported() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/customers")
        .json(&json!({ "name": "", "emailId": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10007);

    let errors = body["errors"].as_array().expect("errors array");
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e["message"].as_str())
        .collect();
    assert_eq!(errors.len(), 2);
    assert!(messages.contains(&"Invalid email format"));
    assert!(messages.contains(&"Name must be 1-200 characters"));
}

#[tokio::test]
async fn test_purchases_and_segments() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Grace", &unique_email()).await;

    let after_purchase = app
        .server
        .post(&format!("/api/v1/customers/{}/purchases", customer_id))
        .json(&json!({ "item": "support plan" }))
        .await;
    after_purchase.assert_status_ok();
    assert_eq!(
        after_purchase.json::<Value>()["purchaseHistory"],
        json!(["support plan"])
    );

    let after_segments = app
        .server
        .put(&format!("/api/v1/customers/{}/segments", customer_id))
        .json(&json!({ "segments": ["vip", "emea"] }))
        .await;
    after_segments.assert_status_ok();
    assert_eq!(
        after_segments.json::<Value>()["segmentationData"],
        json!(["vip", "emea"])
    );
}

#[tokio::test]
async fn test_update_and_delete_customer() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Linus", &unique_email()).await;
    let path = format!("/api/v1/customers/{}", customer_id);

    let updated = app
        .server
        .put(&path)
        .json(&json!({ "name": "Linus T.", "emailId": unique_email() }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["name"], "Linus T.");

    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_customers() {
    let app = TestApp::new().await;
    app.create_customer("One", &unique_email()).await;
    app.create_customer("Two", &unique_email()).await;

    let response = app.server.get("/api/v1/customers").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 2);
}
