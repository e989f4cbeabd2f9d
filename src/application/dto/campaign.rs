//! Campaign DTOs and mapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Campaign, CampaignType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDto {
    #[serde(rename = "campaignID")]
    pub campaign_id: Option<i64>,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[serde(rename = "type")]
    pub campaign_type: CampaignType,

    #[serde(default)]
    #[validate(range(min = 0, message = "Interactions cannot be negative"))]
    pub customer_interactions: i64,

    #[validate(url(message = "Invalid tracking URL"))]
    pub tracking_url: Option<String>,
}

impl From<Campaign> for CampaignDto {
    fn from(campaign: Campaign) -> Self {
        Self {
            campaign_id: Some(campaign.campaign_id),
            name: campaign.name,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            campaign_type: campaign.campaign_type,
            customer_interactions: campaign.customer_interactions,
            tracking_url: campaign.tracking_url,
        }
    }
}

impl From<CampaignDto> for Campaign {
    fn from(dto: CampaignDto) -> Self {
        Self {
            campaign_id: dto.campaign_id.unwrap_or_default(),
            name: dto.name,
            start_date: dto.start_date,
            end_date: dto.end_date,
            campaign_type: dto.campaign_type,
            customer_interactions: dto.customer_interactions,
            tracking_url: dto.tracking_url,
        }
    }
}

/// `?type=` filter
#[derive(Debug, Default, Deserialize)]
pub struct CampaignQuery {
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
}

/// Record interactions; defaults to one
#[derive(Debug, Default, Deserialize, Validate)]
pub struct InteractionRequest {
    #[validate(range(min = 1, message = "Count must be positive"))]
    pub count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_fields() {
        let campaign = Campaign {
            campaign_id: 3,
            name: "Autumn Webinar".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
            campaign_type: CampaignType::Webinar,
            customer_interactions: 120,
            tracking_url: Some("https://t.example.com/autumn".into()),
        };
        assert_eq!(Campaign::from(CampaignDto::from(campaign.clone())), campaign);
    }

    #[test]
    fn test_json_shape() {
        let dto: CampaignDto = serde_json::from_str(
            r#"{"name":"Launch","startDate":"2026-01-01","endDate":"2026-01-31","type":"SOCIAL_MEDIA"}"#,
        )
        .unwrap();
        assert_eq!(dto.campaign_type, CampaignType::SocialMedia);
        assert_eq!(dto.customer_interactions, 0);
        assert_eq!(dto.campaign_id, None);
    }
}
