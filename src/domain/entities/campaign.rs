//! Campaign entity and repository trait.
//!
//! Maps to the `campaigns` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::string_enum::string_enum;
use crate::shared::error::AppError;

string_enum! {
    /// Marketing channel of a campaign.
    pub enum CampaignType {
        Email => "EMAIL",
        Sms => "SMS",
        SocialMedia => "SOCIAL_MEDIA",
        Event => "EVENT",
        Webinar => "WEBINAR",
    }
}

/// A marketing campaign.
///
/// Maps to the `campaigns` table:
/// - campaign_id: BIGINT PRIMARY KEY
/// - name: VARCHAR(200) NOT NULL UNIQUE
/// - start_date / end_date: DATE NOT NULL
/// - campaign_type: VARCHAR(20) NOT NULL
/// - customer_interactions: BIGINT NOT NULL DEFAULT 0
/// - tracking_url: TEXT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub campaign_type: CampaignType,
    pub customer_interactions: i64,
    pub tracking_url: Option<String>,
}

impl Campaign {
    /// `start_date <= end_date`.
    pub fn has_valid_date_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Whether `date` falls inside the campaign window (inclusive).
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Repository trait for Campaign data access operations.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_by_id(&self, campaign_id: i64) -> Result<Option<Campaign>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Campaign>, AppError>;

    /// Campaigns of exactly `campaign_type`.
    async fn find_by_type(&self, campaign_type: CampaignType) -> Result<Vec<Campaign>, AppError>;

    async fn find_all(&self) -> Result<Vec<Campaign>, AppError>;

    /// Insert a campaign. Fails with `Conflict` when the name is taken.
    async fn create(&self, campaign: &Campaign) -> Result<Campaign, AppError>;

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError>;

    async fn delete(&self, campaign_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(start: (i32, u32, u32), end: (i32, u32, u32)) -> Campaign {
        Campaign {
            campaign_id: 1,
            name: "Spring Sale".into(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            campaign_type: CampaignType::Email,
            customer_interactions: 0,
            tracking_url: None,
        }
    }

    #[test]
    fn test_date_range() {
        assert!(campaign((2026, 3, 1), (2026, 3, 31)).has_valid_date_range());
        assert!(campaign((2026, 3, 1), (2026, 3, 1)).has_valid_date_range());
        assert!(!campaign((2026, 4, 1), (2026, 3, 1)).has_valid_date_range());
    }

    #[test]
    fn test_is_running_on_is_inclusive() {
        let c = campaign((2026, 3, 1), (2026, 3, 31));
        assert!(c.is_running_on(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!c.is_running_on(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }

    #[test]
    fn test_campaign_type_accepts_dashes() {
        assert_eq!(
            "social-media".parse::<CampaignType>().unwrap(),
            CampaignType::SocialMedia
        );
    }
}
