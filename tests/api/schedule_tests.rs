//! Schedule Configuration API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{id_of, TestApp};

#[tokio::test]
async fn test_create_and_lookup_by_task() {
    let app = TestApp::new().await;

    let created = app
        .server
        .post("/api/v1/schedules")
        .json(&json!({ "taskName": "follow-up-reminders", "cronExpression": "0 */10 * * * *" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let schedule_id = id_of(&created.json::<Value>(), "id");

    let by_task = app
        .server
        .get("/api/v1/schedules/by-task/follow-up-reminders")
        .await;
    by_task.assert_status_ok();
    let json: Value = by_task.json();
    assert_eq!(id_of(&json, "id"), schedule_id);
    assert_eq!(json["cronExpression"], "0 */10 * * * *");
}

#[tokio::test]
async fn test_invalid_cron_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/schedules")
        .json(&json!({ "taskName": "nightly", "cronExpression": "whenever" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_task_name_returns_409() {
    let app = TestApp::new().await;
    let body = json!({ "taskName": "notification-dispatch", "cronExpression": "0 * * * * *" });
    app.server
        .post("/api/v1/schedules")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.post("/api/v1/schedules").json(&body).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_task_returns_404() {
    let app = TestApp::new().await;

    app.server
        .get("/api/v1/schedules/by-task/never-registered")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
