//! Notification Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{DispatchSummary, NotificationDto, NotificationQuery};
use crate::domain::NotificationStatus;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Queue a notification
pub async fn create_notification(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NotificationDto>,
) -> Result<(StatusCode, Json<NotificationDto>), AppError> {
    validate(&body)?;

    let notification = state.notifications.create_notification(body).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// List notifications, filtered by `?status=` or `?customerId=`
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<NotificationDto>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<NotificationStatus>)
        .transpose()?;

    let mut notifications = match (status, query.customer_id) {
        (Some(status), _) => state.notifications.list_by_status(status).await?,
        (None, Some(customer_id)) => state.notifications.list_by_customer(customer_id).await?,
        (None, None) => state.notifications.list_notifications().await?,
    };
    if let (Some(_), Some(customer_id)) = (status, query.customer_id) {
        notifications.retain(|n| n.customer_id == customer_id);
    }

    Ok(Json(notifications))
}

/// Get notification by ID
pub async fn get_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<Json<NotificationDto>, AppError> {
    let notification_id = parse_id(&notification_id, "notification")?;
    Ok(Json(state.notifications.get_notification(notification_id).await?))
}

/// Update an unsent notification
pub async fn update_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
    JsonBody(body): JsonBody<NotificationDto>,
) -> Result<Json<NotificationDto>, AppError> {
    let notification_id = parse_id(&notification_id, "notification")?;
    validate(&body)?;

    Ok(Json(
        state
            .notifications
            .update_notification(notification_id, body)
            .await?,
    ))
}

/// Delete notification
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let notification_id = parse_id(&notification_id, "notification")?;
    state.notifications.delete_notification(notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deliver one notification now
pub async fn send_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<Json<NotificationDto>, AppError> {
    let notification_id = parse_id(&notification_id, "notification")?;
    Ok(Json(state.notifications.send(notification_id).await?))
}

/// Deliver every pending notification now
pub async fn dispatch_pending(
    State(state): State<AppState>,
) -> Result<Json<DispatchSummary>, AppError> {
    Ok(Json(state.notifications.dispatch_pending().await?))
}
