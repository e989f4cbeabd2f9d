//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{resource} with id {id} not found")]
    ResourceNotFound { resource: &'static str, id: String },

    #[error("Notification with id {0} not found")]
    NotificationNotFound(i64),

    #[error("Unknown {kind} value: {value}")]
    EnumValueNotFound { kind: &'static str, value: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body failed `validator` rules, one entry per failing rule.
    #[error("Validation error: {}", summarize(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl AppError {
    /// Shorthand for a missing entity.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Shorthand for an unparseable enum literal.
    pub fn unknown_enum(kind: &'static str, value: impl Into<String>) -> Self {
        Self::EnumValueNotFound {
            kind,
            value: value.into(),
        }
    }

    /// Whether this error means "the thing does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. } | Self::NotificationNotFound(_)
        )
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let errors = match &self {
            AppError::InvalidFields(fields) => Some(fields.clone()),
            _ => None,
        };

        let (status, code, message) = match &self {
            AppError::ResourceNotFound { .. } | AppError::NotificationNotFound(_) => {
                (StatusCode::NOT_FOUND, 10001, self.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::EnumValueNotFound { .. } => {
                (StatusCode::BAD_REQUEST, 10003, self.to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, 10004, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, 10005, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, 10007, msg.clone()),
            AppError::InvalidFields(fields) => (StatusCode::BAD_REQUEST, 10007, summarize(fields)),
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, 10008, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Scheduler(e) => {
                tracing::error!("Scheduler error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Map a sqlx error raised by an INSERT/UPDATE, turning unique violations into `Conflict`.
pub fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::not_found("CustomerProfile", 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::NotificationNotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_enum_value_not_found_maps_to_400() {
        let err = AppError::unknown_enum("TicketStatus", "REOPENED");
        assert_eq!(err.to_string(), "Unknown TicketStatus value: REOPENED");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_maps_to_502() {
        let response = AppError::Upstream("customer-service returned 500".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_is_not_found() {
        assert!(AppError::not_found("Campaign", 1).is_not_found());
        assert!(AppError::NotificationNotFound(1).is_not_found());
        assert!(!AppError::Conflict("dup".into()).is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_fields_are_listed_in_body() {
        let err = AppError::InvalidFields(vec![
            FieldError {
                field: "email".into(),
                message: "Invalid email format".into(),
            },
            FieldError {
                field: "name".into(),
                message: "Name is required".into(),
            },
        ]);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 10007);
        assert_eq!(
            body["message"],
            "email: Invalid email format; name: Name is required"
        );
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][1]["field"], "name");
    }

    #[test]
    fn test_plain_validation_has_no_field_list() {
        let response = AppError::Validation("bad cron".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
