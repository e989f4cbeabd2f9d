//! Campaign Repository Implementation
//!
//! PostgreSQL implementation of the CampaignRepository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::{Campaign, CampaignRepository, CampaignType};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    campaign_id: i64,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    campaign_type: String,
    customer_interactions: i64,
    tracking_url: Option<String>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = AppError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        Ok(Campaign {
            campaign_id: row.campaign_id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            campaign_type: row.campaign_type.parse()?,
            customer_interactions: row.customer_interactions,
            tracking_url: row.tracking_url,
        })
    }
}

const CAMPAIGN_COLUMNS: &str =
    "campaign_id, name, start_date, end_date, campaign_type, customer_interactions, tracking_url";

/// PostgreSQL campaign repository.
#[derive(Clone)]
pub struct PgCampaignRepository {
    pool: PgPool,
}

impl PgCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, sql: &str, bind: Option<&str>) -> Result<Vec<Campaign>, AppError> {
        let mut query = sqlx::query_as::<_, CampaignRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn find_by_id(&self, campaign_id: i64) -> Result<Option<Campaign>, AppError> {
        sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE campaign_id = $1"
        ))
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Campaign::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Campaign>, AppError> {
        sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .map(Campaign::try_from)
        .transpose()
    }

    async fn find_by_type(&self, campaign_type: CampaignType) -> Result<Vec<Campaign>, AppError> {
        self.fetch_many(
            &format!(
                "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE campaign_type = $1 ORDER BY campaign_id"
            ),
            Some(campaign_type.as_str()),
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Campaign>, AppError> {
        self.fetch_many(
            &format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY campaign_id"),
            None,
        )
        .await
    }

    async fn create(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r#"
            INSERT INTO campaigns
                (campaign_id, name, start_date, end_date, campaign_type, customer_interactions, tracking_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign.campaign_id)
        .bind(&campaign.name)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.campaign_type.as_str())
        .bind(campaign.customer_interactions)
        .bind(&campaign.tracking_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Campaign with this name already exists"))?;

        row.try_into()
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r#"
            UPDATE campaigns
            SET name = $2, start_date = $3, end_date = $4, campaign_type = $5,
                customer_interactions = $6, tracking_url = $7
            WHERE campaign_id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign.campaign_id)
        .bind(&campaign.name)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.campaign_type.as_str())
        .bind(campaign.customer_interactions)
        .bind(&campaign.tracking_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Campaign with this name already exists"))?
        .ok_or_else(|| AppError::not_found("Campaign", campaign.campaign_id))?;

        row.try_into()
    }

    async fn delete(&self, campaign_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE campaign_id = $1")
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Campaign", campaign_id));
        }

        Ok(())
    }
}
