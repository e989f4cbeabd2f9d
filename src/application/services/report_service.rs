//! Report Service
//!
//! Read-only analytics over the pipeline, notifications, tickets and
//! campaigns. [`LoggedReportService`] wraps any implementation and logs
//! each report request before delegating; the application always serves
//! reports through it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::{
    CampaignReport, CampaignTypeSummary, NotificationReport, SalesPipelineReport, StageSummary,
    StatusCount, SupportReport,
};
use crate::domain::{
    CampaignRepository, CampaignType, NotificationRepository, NotificationStatus,
    SalesOpportunityRepository, SalesStage, SupportTicketRepository, TicketStatus,
};
use crate::shared::error::AppError;

/// Report service trait
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Count and estimated value per stage.
    async fn sales_report(&self) -> Result<SalesPipelineReport, AppError>;

    /// Count per delivery status.
    async fn notification_report(&self) -> Result<NotificationReport, AppError>;

    /// Count per ticket status.
    async fn support_report(&self) -> Result<SupportReport, AppError>;

    /// Count and interactions per campaign type.
    async fn campaign_report(&self) -> Result<CampaignReport, AppError>;
}

/// ReportService implementation
pub struct ReportServiceImpl<S, N, T, C>
where
    S: SalesOpportunityRepository + ?Sized,
    N: NotificationRepository + ?Sized,
    T: SupportTicketRepository + ?Sized,
    C: CampaignRepository + ?Sized,
{
    opportunity_repo: Arc<S>,
    notification_repo: Arc<N>,
    ticket_repo: Arc<T>,
    campaign_repo: Arc<C>,
}

impl<S, N, T, C> ReportServiceImpl<S, N, T, C>
where
    S: SalesOpportunityRepository + ?Sized,
    N: NotificationRepository + ?Sized,
    T: SupportTicketRepository + ?Sized,
    C: CampaignRepository + ?Sized,
{
    pub fn new(
        opportunity_repo: Arc<S>,
        notification_repo: Arc<N>,
        ticket_repo: Arc<T>,
        campaign_repo: Arc<C>,
    ) -> Self {
        Self {
            opportunity_repo,
            notification_repo,
            ticket_repo,
            campaign_repo,
        }
    }
}

#[async_trait]
impl<S, N, T, C> ReportService for ReportServiceImpl<S, N, T, C>
where
    S: SalesOpportunityRepository + ?Sized + 'static,
    N: NotificationRepository + ?Sized + 'static,
    T: SupportTicketRepository + ?Sized + 'static,
    C: CampaignRepository + ?Sized + 'static,
{
    async fn sales_report(&self) -> Result<SalesPipelineReport, AppError> {
        let opportunities = self.opportunity_repo.find_all().await?;

        let stages: Vec<StageSummary> = SalesStage::ALL
            .iter()
            .map(|&stage| {
                let in_stage = opportunities.iter().filter(|o| o.sales_stage == stage);
                StageSummary {
                    stage,
                    count: in_stage.clone().count(),
                    total_value: in_stage.map(|o| o.estimated_value).sum(),
                }
            })
            .collect();

        let won_value = stages
            .iter()
            .find(|s| s.stage == SalesStage::ClosedWon)
            .map(|s| s.total_value)
            .unwrap_or_default();

        Ok(SalesPipelineReport {
            total_count: opportunities.len(),
            total_value: stages.iter().map(|s| s.total_value).sum(),
            won_value,
            stages,
        })
    }

    async fn notification_report(&self) -> Result<NotificationReport, AppError> {
        let notifications = self.notification_repo.find_all().await?;

        let statuses = NotificationStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: notifications.iter().filter(|n| n.status == status).count(),
            })
            .collect();

        Ok(NotificationReport {
            statuses,
            total: notifications.len(),
        })
    }

    async fn support_report(&self) -> Result<SupportReport, AppError> {
        let tickets = self.ticket_repo.find_all().await?;

        let statuses = TicketStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: tickets.iter().filter(|t| t.status == status).count(),
            })
            .collect();

        Ok(SupportReport {
            statuses,
            open_tickets: tickets.iter().filter(|t| t.is_open()).count(),
            total: tickets.len(),
        })
    }

    async fn campaign_report(&self) -> Result<CampaignReport, AppError> {
        let campaigns = self.campaign_repo.find_all().await?;

        let types: Vec<CampaignTypeSummary> = CampaignType::ALL
            .iter()
            .map(|&campaign_type| {
                let of_type = campaigns.iter().filter(|c| c.campaign_type == campaign_type);
                CampaignTypeSummary {
                    campaign_type,
                    count: of_type.clone().count(),
                    interactions: of_type
                        .map(|c| c.customer_interactions)
                        .fold(0, i64::saturating_add),
                }
            })
            .collect();

        Ok(CampaignReport {
            total_interactions: types
                .iter()
                .map(|t| t.interactions)
                .fold(0, i64::saturating_add),
            types,
        })
    }
}

/// Logs every report request, then delegates.
pub struct LoggedReportService<R: ReportService> {
    inner: R,
}

impl<R: ReportService> LoggedReportService<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: ReportService> ReportService for LoggedReportService<R> {
    async fn sales_report(&self) -> Result<SalesPipelineReport, AppError> {
        tracing::info!("Generating sales pipeline report");
        self.inner.sales_report().await
    }

    async fn notification_report(&self) -> Result<NotificationReport, AppError> {
        tracing::info!("Generating notification delivery report");
        self.inner.notification_report().await
    }

    async fn support_report(&self) -> Result<SupportReport, AppError> {
        tracing::info!("Generating support ticket report");
        self.inner.support_report().await
    }

    async fn campaign_report(&self) -> Result<CampaignReport, AppError> {
        tracing::info!("Generating campaign report");
        self.inner.campaign_report().await
    }
}
