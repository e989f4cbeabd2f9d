//! Gateway API Tests

use std::collections::HashMap;

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{unique_email, TestApp};

async fn app_with_billing(upstream: &MockServer) -> TestApp {
    TestApp::with_registry(HashMap::from([(
        "billing-service".to_string(),
        upstream.uri(),
    )]))
    .await
}

#[tokio::test]
async fn test_forwards_get_with_query() {
    // Arrange
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(query_param("status", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "invoice": 1 }])))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = app_with_billing(&upstream).await;

    // Act
    let response = app
        .server
        .get("/gateway/billing-service/invoices")
        .add_query_param("status", "open")
        .await;

    // Assert
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([{ "invoice": 1 }]));
}

#[tokio::test]
async fn test_forwards_body_headers_and_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/42/pay"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "amount": 12.5 })))
        .respond_with(ResponseTemplate::new(202).insert_header("x-billing-ref", "abc"))
        .mount(&upstream)
        .await;
    let app = app_with_billing(&upstream).await;

    let response = app
        .server
        .post("/gateway/billing-service/invoices/42/pay")
        .json(&json!({ "amount": 12.5 }))
        .await;

    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(response.header("x-billing-ref"), "abc");
}

#[tokio::test]
async fn test_local_service_is_reachable_through_gateway() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Radia", &unique_email()).await;

    let response = app
        .server
        .get(&format!("/gateway/customer-service/customers/{}", customer_id))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Radia");
}

#[tokio::test]
async fn test_unknown_service_returns_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/gateway/nowhere-service/anything").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_service_returns_502() {
    let app = TestApp::with_registry(HashMap::from([(
        "billing-service".to_string(),
        "http://127.0.0.1:9".to_string(),
    )]))
    .await;

    let response = app.server.get("/gateway/billing-service/invoices").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}
