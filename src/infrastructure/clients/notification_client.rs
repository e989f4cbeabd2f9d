//! Notification service client.

use async_trait::async_trait;

use super::service_client::ServiceClient;
use crate::application::dto::NotificationDto;
use crate::shared::error::AppError;

/// Remote view of the notification module's REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// `POST /notifications`
    async fn create_notification(
        &self,
        notification: &NotificationDto,
    ) -> Result<NotificationDto, AppError>;

    /// `GET /notifications/{id}`; `None` when it does not exist.
    async fn get_notification(&self, notification_id: i64)
        -> Result<Option<NotificationDto>, AppError>;
}

pub struct HttpNotificationClient {
    client: ServiceClient,
}

impl HttpNotificationClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    async fn create_notification(
        &self,
        notification: &NotificationDto,
    ) -> Result<NotificationDto, AppError> {
        self.client.post("/notifications", notification).await
    }

    async fn get_notification(
        &self,
        notification_id: i64,
    ) -> Result<Option<NotificationDto>, AppError> {
        self.client
            .get_optional(&format!("/notifications/{}", notification_id))
            .await
    }
}
