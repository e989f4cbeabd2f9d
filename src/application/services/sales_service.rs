//! Sales Service
//!
//! Sales pipeline management. Customers are verified through the customer
//! service, and closing a deal or reaching a follow-up date notifies the
//! customer through the notification service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::dto::{CustomerProfileDto, NotificationDto, SalesOpportunityDto};
use crate::domain::{
    NotificationStatus, NotificationType, SalesOpportunity, SalesOpportunityRepository, SalesStage,
};
use crate::infrastructure::clients::{CustomerClient, NotificationClient};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Sales service trait
#[async_trait]
pub trait SalesService: Send + Sync {
    async fn create_opportunity(
        &self,
        opportunity: SalesOpportunityDto,
    ) -> Result<SalesOpportunityDto, AppError>;

    async fn get_opportunity(&self, opportunity_id: i64) -> Result<SalesOpportunityDto, AppError>;

    async fn list_opportunities(&self) -> Result<Vec<SalesOpportunityDto>, AppError>;

    async fn list_by_customer(&self, customer_id: i64)
        -> Result<Vec<SalesOpportunityDto>, AppError>;

    async fn list_by_stage(&self, stage: SalesStage) -> Result<Vec<SalesOpportunityDto>, AppError>;

    async fn update_opportunity(
        &self,
        opportunity_id: i64,
        opportunity: SalesOpportunityDto,
    ) -> Result<SalesOpportunityDto, AppError>;

    /// Move to `stage`; any stage may follow any other.
    async fn advance_stage(
        &self,
        opportunity_id: i64,
        stage: SalesStage,
    ) -> Result<SalesOpportunityDto, AppError>;

    async fn delete_opportunity(&self, opportunity_id: i64) -> Result<(), AppError>;

    /// The customer an opportunity belongs to, fetched from the customer service.
    async fn customer_of(&self, opportunity_id: i64) -> Result<CustomerProfileDto, AppError>;

    /// Send a reminder for every follow-up due at `now` and clear it.
    /// Returns how many reminders went out.
    async fn process_follow_ups(&self, now: DateTime<Utc>) -> Result<usize, AppError>;
}

/// SalesService implementation
pub struct SalesServiceImpl<S>
where
    S: SalesOpportunityRepository + ?Sized,
{
    opportunity_repo: Arc<S>,
    customer_client: Arc<dyn CustomerClient>,
    notification_client: Arc<dyn NotificationClient>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<S> SalesServiceImpl<S>
where
    S: SalesOpportunityRepository + ?Sized,
{
    pub fn new(
        opportunity_repo: Arc<S>,
        customer_client: Arc<dyn CustomerClient>,
        notification_client: Arc<dyn NotificationClient>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            opportunity_repo,
            customer_client,
            notification_client,
            id_generator,
        }
    }

    async fn find(&self, opportunity_id: i64) -> Result<SalesOpportunity, AppError> {
        self.opportunity_repo
            .find_by_id(opportunity_id)
            .await?
            .ok_or_else(|| AppError::not_found("SalesOpportunity", opportunity_id))
    }

    async fn require_customer(&self, customer_id: i64) -> Result<CustomerProfileDto, AppError> {
        self.customer_client
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("CustomerProfile", customer_id))
    }

    fn in_app(customer_id: i64, message: String) -> NotificationDto {
        NotificationDto {
            notification_id: None,
            customer_id,
            message,
            notification_type: NotificationType::InApp,
            status: NotificationStatus::Pending,
            sent_at: None,
        }
    }

    /// Best-effort: a failed notification never fails the stage change.
    async fn notify_closed(&self, opportunity: &SalesOpportunity) {
        let won = opportunity.sales_stage == SalesStage::ClosedWon;
        let message = format!(
            "Opportunity {} was closed {} ({:.2})",
            opportunity.opportunity_id,
            if won { "won" } else { "lost" },
            opportunity.estimated_value
        );

        if let Err(e) = self
            .notification_client
            .create_notification(&Self::in_app(opportunity.customer_id, message))
            .await
        {
            tracing::warn!(
                opportunity_id = opportunity.opportunity_id,
                "Failed to notify customer of closed opportunity: {}",
                e
            );
        }
    }

    async fn store_change(
        &self,
        previous_stage: SalesStage,
        opportunity: SalesOpportunity,
    ) -> Result<SalesOpportunityDto, AppError> {
        let updated = self.opportunity_repo.update(&opportunity).await?;

        if updated.sales_stage != previous_stage {
            tracing::info!(
                opportunity_id = updated.opportunity_id,
                from = %previous_stage,
                to = %updated.sales_stage,
                "Opportunity stage changed"
            );
            if updated.sales_stage.is_closed() {
                self.notify_closed(&updated).await;
            }
        }

        Ok(SalesOpportunityDto::from(updated))
    }
}

#[async_trait]
impl<S> SalesService for SalesServiceImpl<S>
where
    S: SalesOpportunityRepository + ?Sized + 'static,
{
    async fn create_opportunity(
        &self,
        opportunity: SalesOpportunityDto,
    ) -> Result<SalesOpportunityDto, AppError> {
        self.require_customer(opportunity.customer_id).await?;

        let mut entity = SalesOpportunity::from(opportunity);
        if entity.opportunity_id == 0 {
            entity.opportunity_id = self.id_generator.generate();
        }

        let created = self.opportunity_repo.create(&entity).await?;
        tracing::info!(
            opportunity_id = created.opportunity_id,
            customer_id = created.customer_id,
            stage = %created.sales_stage,
            "Opportunity created"
        );

        Ok(SalesOpportunityDto::from(created))
    }

    async fn get_opportunity(&self, opportunity_id: i64) -> Result<SalesOpportunityDto, AppError> {
        self.find(opportunity_id).await.map(SalesOpportunityDto::from)
    }

    async fn list_opportunities(&self) -> Result<Vec<SalesOpportunityDto>, AppError> {
        let opportunities = self.opportunity_repo.find_all().await?;
        Ok(opportunities.into_iter().map(SalesOpportunityDto::from).collect())
    }

    async fn list_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<SalesOpportunityDto>, AppError> {
        let opportunities = self.opportunity_repo.find_by_customer_id(customer_id).await?;
        Ok(opportunities.into_iter().map(SalesOpportunityDto::from).collect())
    }

    async fn list_by_stage(&self, stage: SalesStage) -> Result<Vec<SalesOpportunityDto>, AppError> {
        let opportunities = self.opportunity_repo.find_by_stage(stage).await?;
        Ok(opportunities.into_iter().map(SalesOpportunityDto::from).collect())
    }

    async fn update_opportunity(
        &self,
        opportunity_id: i64,
        opportunity: SalesOpportunityDto,
    ) -> Result<SalesOpportunityDto, AppError> {
        let existing = self.find(opportunity_id).await?;
        self.require_customer(opportunity.customer_id).await?;

        let mut entity = SalesOpportunity::from(opportunity);
        entity.opportunity_id = opportunity_id;

        self.store_change(existing.sales_stage, entity).await
    }

    async fn advance_stage(
        &self,
        opportunity_id: i64,
        stage: SalesStage,
    ) -> Result<SalesOpportunityDto, AppError> {
        let mut opportunity = self.find(opportunity_id).await?;
        let previous_stage = opportunity.sales_stage;
        opportunity.sales_stage = stage;

        self.store_change(previous_stage, opportunity).await
    }

    async fn delete_opportunity(&self, opportunity_id: i64) -> Result<(), AppError> {
        self.opportunity_repo.delete(opportunity_id).await
    }

    async fn customer_of(&self, opportunity_id: i64) -> Result<CustomerProfileDto, AppError> {
        let opportunity = self.find(opportunity_id).await?;
        self.require_customer(opportunity.customer_id).await
    }

    async fn process_follow_ups(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let due = self.opportunity_repo.find_follow_ups_due(now).await?;

        let mut reminded = 0;
        for mut opportunity in due {
            let message = format!(
                "Follow-up due for opportunity {} ({})",
                opportunity.opportunity_id, opportunity.sales_stage
            );

            match self
                .notification_client
                .create_notification(&Self::in_app(opportunity.customer_id, message))
                .await
            {
                Ok(_) => {
                    opportunity.follow_up_reminder = None;
                    self.opportunity_repo.update(&opportunity).await?;
                    reminded += 1;
                }
                Err(e) => {
                    // Reminder stays set; retried on the next run.
                    tracing::warn!(
                        opportunity_id = opportunity.opportunity_id,
                        "Failed to send follow-up reminder: {}",
                        e
                    );
                }
            }
        }

        if reminded > 0 {
            tracing::info!(reminded, "Processed follow-up reminders");
        }
        Ok(reminded)
    }
}
