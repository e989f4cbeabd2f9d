//! Notification Service
//!
//! Stores customer notifications and delivers PENDING ones. Delivery
//! resolves the recipient through the customer service; an unknown
//! customer fails the notification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{DispatchSummary, NotificationDto};
use crate::domain::{CustomerProfile, Notification, NotificationRepository, NotificationStatus};
use crate::infrastructure::clients::CustomerClient;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Notification service trait
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Store a new notification as PENDING.
    async fn create_notification(
        &self,
        notification: NotificationDto,
    ) -> Result<NotificationDto, AppError>;

    async fn get_notification(&self, notification_id: i64) -> Result<NotificationDto, AppError>;

    async fn list_notifications(&self) -> Result<Vec<NotificationDto>, AppError>;

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<NotificationDto>, AppError>;

    async fn list_by_status(
        &self,
        status: NotificationStatus,
    ) -> Result<Vec<NotificationDto>, AppError>;

    /// Replace a notification that has not been sent yet.
    async fn update_notification(
        &self,
        notification_id: i64,
        notification: NotificationDto,
    ) -> Result<NotificationDto, AppError>;

    /// Deliver one PENDING notification, leaving it SENT or FAILED.
    async fn send(&self, notification_id: i64) -> Result<NotificationDto, AppError>;

    /// Deliver every PENDING notification.
    async fn dispatch_pending(&self) -> Result<DispatchSummary, AppError>;

    async fn delete_notification(&self, notification_id: i64) -> Result<(), AppError>;
}

/// NotificationService implementation
pub struct NotificationServiceImpl<N>
where
    N: NotificationRepository + ?Sized,
{
    notification_repo: Arc<N>,
    customer_client: Arc<dyn CustomerClient>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<N> NotificationServiceImpl<N>
where
    N: NotificationRepository + ?Sized,
{
    pub fn new(
        notification_repo: Arc<N>,
        customer_client: Arc<dyn CustomerClient>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            notification_repo,
            customer_client,
            id_generator,
        }
    }

    async fn find(&self, notification_id: i64) -> Result<Notification, AppError> {
        self.notification_repo
            .find_by_id(notification_id)
            .await?
            .ok_or(AppError::NotificationNotFound(notification_id))
    }

    async fn deliver(&self, mut notification: Notification) -> Result<Notification, AppError> {
        if notification.status != NotificationStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Notification {} is already {}",
                notification.notification_id, notification.status
            )));
        }

        let recipient = self
            .customer_client
            .get_customer(notification.customer_id)
            .await?
            .map(CustomerProfile::from);

        match &recipient {
            Some(_) => notification.mark_sent(Utc::now())?,
            None => notification.mark_failed()?,
        }

        // Another sender may have finished first; only one write wins.
        let stored = self
            .notification_repo
            .update_if_status(&notification, NotificationStatus::Pending)
            .await?;

        match recipient {
            Some(profile) => {
                let address = profile
                    .contact_info
                    .address_for(stored.notification_type)
                    .unwrap_or("unknown");
                tracing::info!(
                    notification_id = stored.notification_id,
                    customer_id = stored.customer_id,
                    channel = %stored.notification_type,
                    address,
                    "Delivered notification: {}",
                    stored.message
                );
            }
            None => {
                tracing::warn!(
                    notification_id = stored.notification_id,
                    customer_id = stored.customer_id,
                    "Recipient not found, notification failed"
                );
            }
        }

        metrics::record_notification_delivery(
            stored.notification_type.as_str(),
            stored.status.as_str(),
        );
        Ok(stored)
    }
}

#[async_trait]
impl<N> NotificationService for NotificationServiceImpl<N>
where
    N: NotificationRepository + ?Sized + 'static,
{
    async fn create_notification(
        &self,
        notification: NotificationDto,
    ) -> Result<NotificationDto, AppError> {
        let mut entity = Notification::from(notification);
        if entity.notification_id == 0 {
            entity.notification_id = self.id_generator.generate();
        }
        entity.status = NotificationStatus::Pending;
        entity.sent_at = None;

        let created = self.notification_repo.create(&entity).await?;
        tracing::debug!(
            notification_id = created.notification_id,
            customer_id = created.customer_id,
            "Notification queued"
        );

        Ok(NotificationDto::from(created))
    }

    async fn get_notification(&self, notification_id: i64) -> Result<NotificationDto, AppError> {
        self.find(notification_id).await.map(NotificationDto::from)
    }

    async fn list_notifications(&self) -> Result<Vec<NotificationDto>, AppError> {
        let notifications = self.notification_repo.find_all().await?;
        Ok(notifications.into_iter().map(NotificationDto::from).collect())
    }

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<NotificationDto>, AppError> {
        let notifications = self.notification_repo.find_by_customer_id(customer_id).await?;
        Ok(notifications.into_iter().map(NotificationDto::from).collect())
    }

    async fn list_by_status(
        &self,
        status: NotificationStatus,
    ) -> Result<Vec<NotificationDto>, AppError> {
        let notifications = self.notification_repo.find_by_status(status).await?;
        Ok(notifications.into_iter().map(NotificationDto::from).collect())
    }

    async fn update_notification(
        &self,
        notification_id: i64,
        notification: NotificationDto,
    ) -> Result<NotificationDto, AppError> {
        let existing = self.find(notification_id).await?;
        if existing.is_sent() {
            return Err(AppError::Conflict(format!(
                "Notification {} has been sent and cannot change",
                notification_id
            )));
        }

        let mut entity = Notification::from(notification);
        entity.notification_id = notification_id;
        if entity.status != existing.status && !existing.status.can_transition_to(entity.status) {
            return Err(AppError::Conflict(format!(
                "Notification {} cannot move from {} to {}",
                notification_id, existing.status, entity.status
            )));
        }
        if entity.status == NotificationStatus::Sent && entity.sent_at.is_none() {
            entity.sent_at = Some(Utc::now());
        }

        let updated = self
            .notification_repo
            .update_if_status(&entity, existing.status)
            .await?;
        Ok(NotificationDto::from(updated))
    }

    async fn send(&self, notification_id: i64) -> Result<NotificationDto, AppError> {
        let notification = self.find(notification_id).await?;
        self.deliver(notification).await.map(NotificationDto::from)
    }

    async fn dispatch_pending(&self) -> Result<DispatchSummary, AppError> {
        let pending = self
            .notification_repo
            .find_by_status(NotificationStatus::Pending)
            .await?;

        let mut summary = DispatchSummary::default();
        for notification in pending {
            let notification_id = notification.notification_id;
            match self.deliver(notification).await {
                Ok(n) if n.is_sent() => summary.sent += 1,
                Ok(_) => summary.failed += 1,
                Err(e) => {
                    // Left PENDING; the next run retries it.
                    tracing::error!(notification_id, "Dispatch failed: {}", e);
                }
            }
        }

        if summary.sent + summary.failed > 0 {
            tracing::info!(sent = summary.sent, failed = summary.failed, "Dispatched notifications");
        }
        Ok(summary)
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<(), AppError> {
        self.notification_repo.delete(notification_id).await
    }
}
