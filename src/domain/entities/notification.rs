//! Notification entity and repository trait.
//!
//! Maps to the `notifications` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::string_enum::string_enum;
use crate::shared::error::AppError;

string_enum! {
    /// Delivery channel.
    pub enum NotificationType {
        Email => "EMAIL",
        Sms => "SMS",
        Push => "PUSH",
        InApp => "IN_APP",
    }
}

string_enum! {
    /// Delivery state. `Pending` is the only non-terminal state.
    pub enum NotificationStatus {
        Pending => "PENDING",
        Sent => "SENT",
        Failed => "FAILED",
    }
}

impl NotificationStatus {
    /// Allowed moves: PENDING -> SENT and PENDING -> FAILED.
    pub fn can_transition_to(self, next: NotificationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Sent) | (Self::Pending, Self::Failed)
        )
    }
}

/// A message addressed to one customer.
///
/// Maps to the `notifications` table:
/// - notification_id: BIGINT PRIMARY KEY
/// - customer_id: BIGINT NOT NULL
/// - message: TEXT NOT NULL
/// - notification_type: VARCHAR(20) NOT NULL
/// - status: VARCHAR(20) NOT NULL
/// - sent_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub customer_id: i64,
    pub message: String,
    pub notification_type: NotificationType,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// A fresh PENDING notification.
    pub fn pending(
        notification_id: i64,
        customer_id: i64,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            notification_id,
            customer_id,
            message: message.into(),
            notification_type,
            status: NotificationStatus::Pending,
            sent_at: None,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status == NotificationStatus::Sent
    }

    /// PENDING -> SENT, stamping `sent_at`.
    pub fn mark_sent(&mut self, at: DateTime<Utc>) -> Result<(), AppError> {
        self.transition(NotificationStatus::Sent)?;
        self.sent_at = Some(at);
        Ok(())
    }

    /// PENDING -> FAILED.
    pub fn mark_failed(&mut self) -> Result<(), AppError> {
        self.transition(NotificationStatus::Failed)
    }

    fn transition(&mut self, next: NotificationStatus) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Notification {} cannot move from {} to {}",
                self.notification_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}

/// Repository trait for Notification data access operations.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, notification_id: i64) -> Result<Option<Notification>, AppError>;

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Notification>, AppError>;

    async fn find_by_status(&self, status: NotificationStatus) -> Result<Vec<Notification>, AppError>;

    async fn find_all(&self) -> Result<Vec<Notification>, AppError>;

    async fn create(&self, notification: &Notification) -> Result<Notification, AppError>;

    async fn update(&self, notification: &Notification) -> Result<Notification, AppError>;

    /// Write `notification` only if the stored row is still in `expected`
    /// status; otherwise `Conflict`. Check and write are one atomic step.
    async fn update_if_status(
        &self,
        notification: &Notification,
        expected: NotificationStatus,
    ) -> Result<Notification, AppError>;

    async fn delete(&self, notification_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_sent_once() {
        let mut n = Notification::pending(1, 10, "hello", NotificationType::Email);
        let now = Utc::now();
        n.mark_sent(now).unwrap();
        assert!(n.is_sent());
        assert_eq!(n.sent_at, Some(now));

        assert!(matches!(n.mark_sent(Utc::now()), Err(AppError::Conflict(_))));
        assert!(matches!(n.mark_failed(), Err(AppError::Conflict(_))));
        assert_eq!(n.sent_at, Some(now));
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut n = Notification::pending(1, 10, "hello", NotificationType::Sms);
        n.mark_failed().unwrap();
        assert_eq!(n.status, NotificationStatus::Failed);
        assert!(n.sent_at.is_none());
        assert!(n.mark_sent(Utc::now()).is_err());
    }

    #[test]
    fn test_transition_table() {
        use NotificationStatus::*;
        for from in NotificationStatus::ALL {
            for to in NotificationStatus::ALL {
                let expected = *from == Pending && *to != Pending;
                assert_eq!(from.can_transition_to(*to), expected, "{from} -> {to}");
            }
        }
    }
}
