//! Sales Opportunity API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{id_of, unique_email, TestApp};

async fn create_opportunity(app: &TestApp, customer_id: i64, value: f64) -> i64 {
    let response = app
        .server
        .post("/api/v1/opportunities")
        .json(&json!({
            "customerID": customer_id,
            "salesStage": "PROSPECTING",
            "estimatedValue": value,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    id_of(&response.json::<Value>(), "opportunityID")
}

#[tokio::test]
async fn test_create_with_unknown_customer_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/opportunities")
        .json(&json!({
            "customerID": 31337,
            "salesStage": "PROSPECTING",
            "estimatedValue": 100.0,
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_opportunity_customer_lookup() {
    // Arrange
    let app = TestApp::new().await;
    let email = unique_email();
    let customer_id = app.create_customer("Alan", &email).await;
    let opportunity_id = create_opportunity(&app, customer_id, 2500.0).await;

    // Act
    let response = app
        .server
        .get(&format!("/api/v1/opportunities/{}/customer", opportunity_id))
        .await;

    // Assert
    response.assert_status_ok();
    let customer: Value = response.json();
    assert_eq!(id_of(&customer, "customerID"), customer_id);
    assert_eq!(customer["emailId"], email.as_str());
}

#[tokio::test]
async fn test_closing_stage_notifies_customer() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Katherine", &unique_email()).await;
    let opportunity_id = create_opportunity(&app, customer_id, 9000.0).await;

    let response = app
        .server
        .put(&format!("/api/v1/opportunities/{}/stage", opportunity_id))
        .json(&json!({ "salesStage": "CLOSED_WON" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["salesStage"], "CLOSED_WON");

    let notifications: Vec<Value> = app
        .server
        .get("/api/v1/notifications")
        .add_query_param("customerId", customer_id)
        .await
        .json();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "IN_APP");
    assert_eq!(notifications[0]["status"], "PENDING");
}

#[tokio::test]
async fn test_unknown_stage_returns_400() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Dennis", &unique_email()).await;
    let opportunity_id = create_opportunity(&app, customer_id, 10.0).await;

    app.server
        .put(&format!("/api/v1/opportunities/{}/stage", opportunity_id))
        .json(&json!({ "salesStage": "DAYDREAMING" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .get("/api/v1/opportunities")
        .add_query_param("stage", "DAYDREAMING")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filter_by_stage() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Ken", &unique_email()).await;
    create_opportunity(&app, customer_id, 10.0).await;
    let moved = create_opportunity(&app, customer_id, 20.0).await;
    app.server
        .put(&format!("/api/v1/opportunities/{}/stage", moved))
        .json(&json!({ "salesStage": "NEGOTIATION" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/api/v1/opportunities")
        .add_query_param("stage", "negotiation")
        .await;

    response.assert_status_ok();
    let list: Vec<Value> = response.json();
    assert_eq!(list.len(), 1);
    assert_eq!(id_of(&list[0], "opportunityID"), moved);
}
