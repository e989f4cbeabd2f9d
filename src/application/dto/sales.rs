//! Sales opportunity DTOs and mapping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{SalesOpportunity, SalesStage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalesOpportunityDto {
    #[serde(rename = "opportunityID")]
    pub opportunity_id: Option<i64>,

    #[serde(rename = "customerID")]
    pub customer_id: i64,

    pub sales_stage: SalesStage,

    #[validate(range(min = 0.0, message = "Estimated value cannot be negative"))]
    pub estimated_value: f64,

    pub closing_date: Option<NaiveDate>,

    pub follow_up_reminder: Option<DateTime<Utc>>,
}

impl From<SalesOpportunity> for SalesOpportunityDto {
    fn from(opportunity: SalesOpportunity) -> Self {
        Self {
            opportunity_id: Some(opportunity.opportunity_id),
            customer_id: opportunity.customer_id,
            sales_stage: opportunity.sales_stage,
            estimated_value: opportunity.estimated_value,
            closing_date: opportunity.closing_date,
            follow_up_reminder: opportunity.follow_up_reminder,
        }
    }
}

impl From<SalesOpportunityDto> for SalesOpportunity {
    fn from(dto: SalesOpportunityDto) -> Self {
        Self {
            opportunity_id: dto.opportunity_id.unwrap_or_default(),
            customer_id: dto.customer_id,
            sales_stage: dto.sales_stage,
            estimated_value: dto.estimated_value,
            closing_date: dto.closing_date,
            follow_up_reminder: dto.follow_up_reminder,
        }
    }
}

/// `?stage=&customerId=` filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityQuery {
    pub stage: Option<String>,
    pub customer_id: Option<i64>,
}

/// Move an opportunity to another stage
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageUpdateRequest {
    pub sales_stage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_fields() {
        let opportunity = SalesOpportunity {
            opportunity_id: 5,
            customer_id: 6,
            sales_stage: SalesStage::Negotiation,
            estimated_value: 12_500.5,
            closing_date: NaiveDate::from_ymd_opt(2026, 12, 15),
            follow_up_reminder: Some(Utc::now()),
        };
        assert_eq!(
            SalesOpportunity::from(SalesOpportunityDto::from(opportunity.clone())),
            opportunity
        );
    }
}
