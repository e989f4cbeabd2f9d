//! Notification DTOs and mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Notification, NotificationStatus, NotificationType};

fn pending() -> NotificationStatus {
    NotificationStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    #[serde(rename = "notificationID")]
    pub notification_id: Option<i64>,

    #[serde(rename = "customerID")]
    pub customer_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    #[serde(default = "pending")]
    pub status: NotificationStatus,

    pub sent_at: Option<DateTime<Utc>>,
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        Self {
            notification_id: Some(notification.notification_id),
            customer_id: notification.customer_id,
            message: notification.message,
            notification_type: notification.notification_type,
            status: notification.status,
            sent_at: notification.sent_at,
        }
    }
}

impl From<NotificationDto> for Notification {
    fn from(dto: NotificationDto) -> Self {
        Self {
            notification_id: dto.notification_id.unwrap_or_default(),
            customer_id: dto.customer_id,
            message: dto.message,
            notification_type: dto.notification_type,
            status: dto.status,
            sent_at: dto.sent_at,
        }
    }
}

/// `?status=&customerId=` filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub status: Option<String>,
    pub customer_id: Option<i64>,
}

/// Outcome of a dispatch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}
