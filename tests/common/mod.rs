//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crm_platform::config::Settings;
use crm_platform::infrastructure::repositories::Repositories;
use crm_platform::presentation::http::create_router;
use crm_platform::startup::AppState;

/// Test application over in-memory repositories.
///
/// The router is also served on a loopback port so that the modules'
/// inter-service HTTP calls reach this same instance.
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_registry(HashMap::new()).await
    }

    /// Start with extra `service name -> base URL` registry entries.
    pub async fn with_registry(registry: HashMap<String, String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let mut settings = Settings::defaults().unwrap();
        settings.server.host = "127.0.0.1".into();
        settings.server.port = address.port();
        settings.services.registry = registry;

        let state = AppState::new(settings, Repositories::in_memory(), None).unwrap();
        let router = create_router(state);

        let served = router.clone();
        tokio::spawn(async move { axum::serve(listener, served).await });

        Self {
            server: TestServer::new(router).unwrap(),
        }
    }

    /// Create a customer and return its id.
    pub async fn create_customer(&self, name: &str, email: &str) -> i64 {
        let response = self
            .server
            .post("/api/v1/customers")
            .json(&json!({
                "customerID": null,
                "name": name,
                "emailId": email,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        id_of(&response.json::<Value>(), "customerID")
    }

    /// Queue a notification and return its id.
    pub async fn create_notification(&self, customer_id: i64, message: &str) -> i64 {
        let response = self
            .server
            .post("/api/v1/notifications")
            .json(&json!({
                "customerID": customer_id,
                "message": message,
                "type": "EMAIL",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        id_of(&response.json::<Value>(), "notificationID")
    }
}

/// Read an id field from a JSON body.
pub fn id_of(body: &Value, field: &str) -> i64 {
    body[field]
        .as_i64()
        .unwrap_or_else(|| panic!("missing {field} in {body}"))
}

/// Generate a unique test email
pub fn unique_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}
