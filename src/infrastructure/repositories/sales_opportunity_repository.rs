//! Sales Opportunity Repository Implementation
//!
//! PostgreSQL implementation of the SalesOpportunityRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::{SalesOpportunity, SalesOpportunityRepository, SalesStage};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct SalesOpportunityRow {
    opportunity_id: i64,
    customer_id: i64,
    sales_stage: String,
    estimated_value: f64,
    closing_date: Option<NaiveDate>,
    follow_up_reminder: Option<DateTime<Utc>>,
}

impl TryFrom<SalesOpportunityRow> for SalesOpportunity {
    type Error = AppError;

    fn try_from(row: SalesOpportunityRow) -> Result<Self, Self::Error> {
        Ok(SalesOpportunity {
            opportunity_id: row.opportunity_id,
            customer_id: row.customer_id,
            sales_stage: row.sales_stage.parse()?,
            estimated_value: row.estimated_value,
            closing_date: row.closing_date,
            follow_up_reminder: row.follow_up_reminder,
        })
    }
}

const OPPORTUNITY_COLUMNS: &str =
    "opportunity_id, customer_id, sales_stage, estimated_value, closing_date, follow_up_reminder";

/// PostgreSQL sales opportunity repository.
#[derive(Clone)]
pub struct PgSalesOpportunityRepository {
    pool: PgPool,
}

impl PgSalesOpportunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn convert_all(rows: Vec<SalesOpportunityRow>) -> Result<Vec<SalesOpportunity>, AppError> {
    rows.into_iter().map(SalesOpportunity::try_from).collect()
}

#[async_trait]
impl SalesOpportunityRepository for PgSalesOpportunityRepository {
    async fn find_by_id(&self, opportunity_id: i64) -> Result<Option<SalesOpportunity>, AppError> {
        sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM sales_opportunities WHERE opportunity_id = $1"
        ))
        .bind(opportunity_id)
        .fetch_optional(&self.pool)
        .await?
        .map(SalesOpportunity::try_from)
        .transpose()
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SalesOpportunity>, AppError> {
        let rows = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM sales_opportunities WHERE customer_id = $1 ORDER BY opportunity_id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_by_stage(&self, stage: SalesStage) -> Result<Vec<SalesOpportunity>, AppError> {
        let rows = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM sales_opportunities WHERE sales_stage = $1 ORDER BY opportunity_id"
        ))
        .bind(stage.as_str())
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_follow_ups_due(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<SalesOpportunity>, AppError> {
        let rows = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            r#"
            SELECT {OPPORTUNITY_COLUMNS} FROM sales_opportunities
            WHERE follow_up_reminder IS NOT NULL AND follow_up_reminder <= $1
            ORDER BY follow_up_reminder
            "#
        ))
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_all(&self) -> Result<Vec<SalesOpportunity>, AppError> {
        let rows = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM sales_opportunities ORDER BY opportunity_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn create(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError> {
        let row = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            r#"
            INSERT INTO sales_opportunities
                (opportunity_id, customer_id, sales_stage, estimated_value, closing_date, follow_up_reminder)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        ))
        .bind(opportunity.opportunity_id)
        .bind(opportunity.customer_id)
        .bind(opportunity.sales_stage.as_str())
        .bind(opportunity.estimated_value)
        .bind(opportunity.closing_date)
        .bind(opportunity.follow_up_reminder)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Sales opportunity with this id already exists"))?;

        row.try_into()
    }

    async fn update(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError> {
        let row = sqlx::query_as::<_, SalesOpportunityRow>(&format!(
            r#"
            UPDATE sales_opportunities
            SET customer_id = $2, sales_stage = $3, estimated_value = $4,
                closing_date = $5, follow_up_reminder = $6
            WHERE opportunity_id = $1
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        ))
        .bind(opportunity.opportunity_id)
        .bind(opportunity.customer_id)
        .bind(opportunity.sales_stage.as_str())
        .bind(opportunity.estimated_value)
        .bind(opportunity.closing_date)
        .bind(opportunity.follow_up_reminder)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("SalesOpportunity", opportunity.opportunity_id))?;

        row.try_into()
    }

    async fn delete(&self, opportunity_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sales_opportunities WHERE opportunity_id = $1")
            .bind(opportunity_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("SalesOpportunity", opportunity_id));
        }

        Ok(())
    }
}
