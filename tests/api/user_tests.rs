//! User API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{id_of, unique_email, TestApp};

async fn register(app: &TestApp, email: &str) -> axum_test::TestResponse {
    app.server
        .post("/api/v1/users")
        .json(&json!({
            "name": "Test User",
            "role": "SALES",
            "email": email,
            "password": "correct-horse",
        }))
        .await
}

#[tokio::test]
async fn test_register_hides_password() {
    // Arrange
    let app = TestApp::new().await;
    let email = unique_email();

    // Act
    let response = register(&app, &email).await;

    // Assert
    response.assert_status(StatusCode::CREATED);
    let json: Value = response.json();
    assert!(id_of(&json, "id") > 0);
    assert_eq!(json["role"], "SALES");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = TestApp::new().await;
    let email = unique_email();
    register(&app, &email).await.assert_status(StatusCode::CREATED);

    let response = register(&app, &email).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    let email = unique_email();
    register(&app, &email).await.assert_status(StatusCode::CREATED);

    let ok = app
        .server
        .post("/api/v1/users/login")
        .json(&json!({ "email": email, "password": "correct-horse" }))
        .await;
    ok.assert_status_ok();
    assert_eq!(ok.json::<Value>()["email"], email.as_str());

    let wrong = app
        .server
        .post("/api/v1/users/login")
        .json(&json!({ "email": email, "password": "battery-staple" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lookup_by_email() {
    let app = TestApp::new().await;
    let email = unique_email();
    register(&app, &email).await.assert_status(StatusCode::CREATED);

    let found = app
        .server
        .get("/api/v1/users/by-email")
        .add_query_param("email", &email)
        .await;
    found.assert_status_ok();
    assert_eq!(found.json::<Value>()["name"], "Test User");

    app.server
        .get("/api/v1/users/by-email")
        .add_query_param("email", "nobody@example.com")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/users")
        .json(&json!({
            "name": "Test User",
            "role": "JANITOR",
            "email": unique_email(),
            "password": "correct-horse",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
