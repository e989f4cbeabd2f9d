//! Sales opportunity entity and repository trait.
//!
//! Maps to the `sales_opportunities` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::string_enum::string_enum;
use crate::shared::error::AppError;

string_enum! {
    /// Pipeline stage. Any stage may follow any other.
    pub enum SalesStage {
        Prospecting => "PROSPECTING",
        Qualification => "QUALIFICATION",
        Proposal => "PROPOSAL",
        Negotiation => "NEGOTIATION",
        ClosedWon => "CLOSED_WON",
        ClosedLost => "CLOSED_LOST",
    }
}

impl SalesStage {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

/// A deal in the sales pipeline.
///
/// Maps to the `sales_opportunities` table:
/// - opportunity_id: BIGINT PRIMARY KEY
/// - customer_id: BIGINT NOT NULL
/// - sales_stage: VARCHAR(20) NOT NULL
/// - estimated_value: DOUBLE PRECISION NOT NULL
/// - closing_date: DATE NULL
/// - follow_up_reminder: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOpportunity {
    pub opportunity_id: i64,
    pub customer_id: i64,
    pub sales_stage: SalesStage,
    pub estimated_value: f64,
    pub closing_date: Option<NaiveDate>,
    pub follow_up_reminder: Option<DateTime<Utc>>,
}

impl SalesOpportunity {
    /// Whether a follow-up reminder is set and due at `now`.
    pub fn follow_up_due(&self, now: DateTime<Utc>) -> bool {
        self.follow_up_reminder.is_some_and(|at| at <= now)
    }
}

/// Repository trait for SalesOpportunity data access operations.
#[async_trait]
pub trait SalesOpportunityRepository: Send + Sync {
    async fn find_by_id(&self, opportunity_id: i64) -> Result<Option<SalesOpportunity>, AppError>;

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SalesOpportunity>, AppError>;

    async fn find_by_stage(&self, stage: SalesStage) -> Result<Vec<SalesOpportunity>, AppError>;

    /// Opportunities whose follow-up reminder is at or before `before`.
    async fn find_follow_ups_due(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<SalesOpportunity>, AppError>;

    async fn find_all(&self) -> Result<Vec<SalesOpportunity>, AppError>;

    async fn create(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError>;

    async fn update(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError>;

    async fn delete(&self, opportunity_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_closed_stages() {
        assert!(SalesStage::ClosedWon.is_closed());
        assert!(SalesStage::ClosedLost.is_closed());
        assert!(!SalesStage::Negotiation.is_closed());
    }

    #[test]
    fn test_follow_up_due() {
        let now = Utc::now();
        let mut opp = SalesOpportunity {
            opportunity_id: 1,
            customer_id: 2,
            sales_stage: SalesStage::Proposal,
            estimated_value: 1000.0,
            closing_date: None,
            follow_up_reminder: None,
        };
        assert!(!opp.follow_up_due(now));

        opp.follow_up_reminder = Some(now - Duration::minutes(1));
        assert!(opp.follow_up_due(now));

        opp.follow_up_reminder = Some(now + Duration::minutes(1));
        assert!(!opp.follow_up_due(now));
    }

    #[test]
    fn test_stage_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&SalesStage::ClosedWon).unwrap(),
            "\"CLOSED_WON\""
        );
    }
}
