//! Report API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{unique_email, TestApp};

fn count_for(rows: &Value, key: &str, value: &str) -> u64 {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|row| row[key] == value)
        .and_then(|row| row["count"].as_u64())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_sales_report_totals() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer("Hedy", &unique_email()).await;
    for (stage, value) in [("PROSPECTING", 100.0), ("CLOSED_WON", 400.0), ("CLOSED_WON", 600.0)] {
        app.server
            .post("/api/v1/opportunities")
            .json(&json!({
                "customerID": customer_id,
                "salesStage": stage,
                "estimatedValue": value,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app.server.get("/api/v1/reports/sales").await;

    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["totalCount"], 3);
    assert_eq!(report["totalValue"], 1100.0);
    assert_eq!(report["wonValue"], 1000.0);
    assert_eq!(count_for(&report["stages"], "stage", "CLOSED_WON"), 2);
}

#[tokio::test]
async fn test_notification_report_counts_statuses() {
    let app = TestApp::new().await;
    let notification_id = app.create_notification(404_404, "orphan").await;
    app.create_notification(404_404, "still pending").await;
    app.server
        .post(&format!("/api/v1/notifications/{}/send", notification_id))
        .await
        .assert_status_ok();

    let report: Value = app.server.get("/api/v1/reports/notifications").await.json();

    assert_eq!(report["total"], 2);
    assert_eq!(count_for(&report["statuses"], "status", "FAILED"), 1);
    assert_eq!(count_for(&report["statuses"], "status", "PENDING"), 1);
}

#[tokio::test]
async fn test_empty_reports() {
    let app = TestApp::new().await;

    let support: Value = app.server.get("/api/v1/reports/support").await.json();
    assert_eq!(support["total"], 0);
    assert_eq!(support["openTickets"], 0);

    let campaigns: Value = app.server.get("/api/v1/reports/campaigns").await.json();
    assert_eq!(campaigns["totalInteractions"], 0);
}
