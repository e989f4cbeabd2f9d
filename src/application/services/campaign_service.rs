//! Campaign Service
//!
//! Marketing campaigns and interaction tracking.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::CampaignDto;
use crate::domain::{Campaign, CampaignRepository, CampaignType};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Campaign service trait
#[async_trait]
pub trait CampaignService: Send + Sync {
    async fn create_campaign(&self, campaign: CampaignDto) -> Result<CampaignDto, AppError>;

    async fn get_campaign(&self, campaign_id: i64) -> Result<CampaignDto, AppError>;

    async fn list_campaigns(&self) -> Result<Vec<CampaignDto>, AppError>;

    async fn list_by_type(&self, campaign_type: CampaignType) -> Result<Vec<CampaignDto>, AppError>;

    async fn update_campaign(
        &self,
        campaign_id: i64,
        campaign: CampaignDto,
    ) -> Result<CampaignDto, AppError>;

    async fn delete_campaign(&self, campaign_id: i64) -> Result<(), AppError>;

    /// Add `count` to the campaign's interaction counter.
    async fn record_interaction(&self, campaign_id: i64, count: i64)
        -> Result<CampaignDto, AppError>;
}

/// CampaignService implementation
pub struct CampaignServiceImpl<C>
where
    C: CampaignRepository + ?Sized,
{
    campaign_repo: Arc<C>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<C> CampaignServiceImpl<C>
where
    C: CampaignRepository + ?Sized,
{
    pub fn new(campaign_repo: Arc<C>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            campaign_repo,
            id_generator,
        }
    }

    fn check_dates(campaign: &Campaign) -> Result<(), AppError> {
        if campaign.has_valid_date_range() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "endDate: {} is before startDate {}",
                campaign.end_date, campaign.start_date
            )))
        }
    }
}

#[async_trait]
impl<C> CampaignService for CampaignServiceImpl<C>
where
    C: CampaignRepository + ?Sized + 'static,
{
    async fn create_campaign(&self, campaign: CampaignDto) -> Result<CampaignDto, AppError> {
        let mut entity = Campaign::from(campaign);
        Self::check_dates(&entity)?;
        if entity.campaign_id == 0 {
            entity.campaign_id = self.id_generator.generate();
        }

        let created = self.campaign_repo.create(&entity).await?;
        tracing::info!(
            campaign_id = created.campaign_id,
            campaign_type = %created.campaign_type,
            "Campaign created"
        );

        Ok(CampaignDto::from(created))
    }

    async fn get_campaign(&self, campaign_id: i64) -> Result<CampaignDto, AppError> {
        self.campaign_repo
            .find_by_id(campaign_id)
            .await?
            .map(CampaignDto::from)
            .ok_or_else(|| AppError::not_found("Campaign", campaign_id))
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignDto>, AppError> {
        let campaigns = self.campaign_repo.find_all().await?;
        Ok(campaigns.into_iter().map(CampaignDto::from).collect())
    }

    async fn list_by_type(&self, campaign_type: CampaignType) -> Result<Vec<CampaignDto>, AppError> {
        let campaigns = self.campaign_repo.find_by_type(campaign_type).await?;
        Ok(campaigns.into_iter().map(CampaignDto::from).collect())
    }

    async fn update_campaign(
        &self,
        campaign_id: i64,
        campaign: CampaignDto,
    ) -> Result<CampaignDto, AppError> {
        let mut entity = Campaign::from(campaign);
        entity.campaign_id = campaign_id;
        Self::check_dates(&entity)?;

        let updated = self.campaign_repo.update(&entity).await?;
        Ok(CampaignDto::from(updated))
    }

    async fn delete_campaign(&self, campaign_id: i64) -> Result<(), AppError> {
        self.campaign_repo.delete(campaign_id).await
    }

    async fn record_interaction(
        &self,
        campaign_id: i64,
        count: i64,
    ) -> Result<CampaignDto, AppError> {
        if count < 1 {
            return Err(AppError::Validation("count: Count must be positive".into()));
        }

        let mut campaign = self
            .campaign_repo
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign", campaign_id))?;
        campaign.customer_interactions = campaign.customer_interactions.saturating_add(count);

        let updated = self.campaign_repo.update(&campaign).await?;
        Ok(CampaignDto::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryCampaignRepository;
    use chrono::NaiveDate;

    fn service() -> CampaignServiceImpl<InMemoryCampaignRepository> {
        CampaignServiceImpl::new(
            Arc::new(InMemoryCampaignRepository::new()),
            Arc::new(SnowflakeGenerator::default()),
        )
    }

    fn spring_sale(name: &str, campaign_type: CampaignType) -> CampaignDto {
        CampaignDto {
            campaign_id: None,
            name: name.into(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            campaign_type,
            customer_interactions: 0,
            tracking_url: Some("https://t.example.com/spring".into()),
        }
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected() {
        let mut campaign = spring_sale("Spring", CampaignType::Email);
        campaign.end_date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let err = service().create_campaign(campaign).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = service();
        service
            .create_campaign(spring_sale("Spring", CampaignType::Email))
            .await
            .unwrap();

        let err = service
            .create_campaign(spring_sale("Spring", CampaignType::Sms))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_by_type_filters() {
        let service = service();
        service
            .create_campaign(spring_sale("Spring", CampaignType::Email))
            .await
            .unwrap();
        service
            .create_campaign(spring_sale("Launch", CampaignType::Webinar))
            .await
            .unwrap();

        let webinars = service.list_by_type(CampaignType::Webinar).await.unwrap();
        assert_eq!(webinars.len(), 1);
        assert_eq!(webinars[0].name, "Launch");
    }

    #[tokio::test]
    async fn test_record_interaction_increments() {
        let service = service();
        let id = service
            .create_campaign(spring_sale("Spring", CampaignType::Email))
            .await
            .unwrap()
            .campaign_id
            .unwrap();

        service.record_interaction(id, 1).await.unwrap();
        let updated = service.record_interaction(id, 4).await.unwrap();
        assert_eq!(updated.customer_interactions, 5);

        let err = service.record_interaction(id, 0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
