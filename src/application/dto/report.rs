//! Analytics report DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{CampaignType, NotificationStatus, SalesStage, TicketStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub stage: SalesStage,
    pub count: usize,
    pub total_value: f64,
}

/// Pipeline totals per stage, every stage listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPipelineReport {
    pub stages: Vec<StageSummary>,
    pub total_count: usize,
    pub total_value: f64,
    pub won_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReport {
    pub statuses: Vec<StatusCount<NotificationStatus>>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportReport {
    pub statuses: Vec<StatusCount<TicketStatus>>,
    pub open_tickets: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignTypeSummary {
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub count: usize,
    pub interactions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignReport {
    pub types: Vec<CampaignTypeSummary>,
    pub total_interactions: i64,
}
