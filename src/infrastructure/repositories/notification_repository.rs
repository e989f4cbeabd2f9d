//! Notification Repository Implementation
//!
//! PostgreSQL implementation of the NotificationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Notification, NotificationRepository, NotificationStatus};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    notification_id: i64,
    customer_id: i64,
    message: String,
    notification_type: String,
    status: String,
    sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            notification_id: row.notification_id,
            customer_id: row.customer_id,
            message: row.message,
            notification_type: row.notification_type.parse()?,
            status: row.status.parse()?,
            sent_at: row.sent_at,
        })
    }
}

const NOTIFICATION_COLUMNS: &str =
    "notification_id, customer_id, message, notification_type, status, sent_at";

/// PostgreSQL notification repository.
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn convert_all(rows: Vec<NotificationRow>) -> Result<Vec<Notification>, AppError> {
    rows.into_iter().map(Notification::try_from).collect()
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn find_by_id(&self, notification_id: i64) -> Result<Option<Notification>, AppError> {
        sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE notification_id = $1"
        ))
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Notification::try_from)
        .transpose()
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Notification>, AppError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE customer_id = $1 ORDER BY notification_id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_by_status(&self, status: NotificationStatus) -> Result<Vec<Notification>, AppError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE status = $1 ORDER BY notification_id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_all(&self) -> Result<Vec<Notification>, AppError> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY notification_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn create(&self, notification: &Notification) -> Result<Notification, AppError> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            INSERT INTO notifications
                (notification_id, customer_id, message, notification_type, status, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification.notification_id)
        .bind(notification.customer_id)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.status.as_str())
        .bind(notification.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Notification with this id already exists"))?;

        row.try_into()
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, AppError> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET customer_id = $2, message = $3, notification_type = $4, status = $5, sent_at = $6
            WHERE notification_id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification.notification_id)
        .bind(notification.customer_id)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.status.as_str())
        .bind(notification.sent_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotificationNotFound(notification.notification_id))?;

        row.try_into()
    }

    async fn update_if_status(
        &self,
        notification: &Notification,
        expected: NotificationStatus,
    ) -> Result<Notification, AppError> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET customer_id = $2, message = $3, notification_type = $4, status = $5, sent_at = $6
            WHERE notification_id = $1 AND status = $7
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification.notification_id)
        .bind(notification.customer_id)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.status.as_str())
        .bind(notification.sent_at)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => match self.find_by_id(notification.notification_id).await? {
                Some(current) => Err(AppError::Conflict(format!(
                    "Notification {} is already {}",
                    current.notification_id, current.status
                ))),
                None => Err(AppError::NotificationNotFound(notification.notification_id)),
            },
        }
    }

    async fn delete(&self, notification_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE notification_id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotificationNotFound(notification_id));
        }

        Ok(())
    }
}
