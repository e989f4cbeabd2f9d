//! Schedule Config Repository Implementation
//!
//! PostgreSQL implementation of the ScheduleConfigRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{ScheduleConfig, ScheduleConfigRepository};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct ScheduleConfigRow {
    id: i64,
    task_name: String,
    cron_expression: String,
}

impl From<ScheduleConfigRow> for ScheduleConfig {
    fn from(row: ScheduleConfigRow) -> Self {
        ScheduleConfig {
            id: row.id,
            task_name: row.task_name,
            cron_expression: row.cron_expression,
        }
    }
}

/// PostgreSQL schedule config repository.
#[derive(Clone)]
pub struct PgScheduleConfigRepository {
    pool: PgPool,
}

impl PgScheduleConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleConfigRepository for PgScheduleConfigRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleConfig>, AppError> {
        let row = sqlx::query_as::<_, ScheduleConfigRow>(
            "SELECT id, task_name, cron_expression FROM schedule_configs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScheduleConfig::from))
    }

    async fn find_by_task_name(&self, task_name: &str) -> Result<Option<ScheduleConfig>, AppError> {
        let row = sqlx::query_as::<_, ScheduleConfigRow>(
            "SELECT id, task_name, cron_expression FROM schedule_configs WHERE task_name = $1",
        )
        .bind(task_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScheduleConfig::from))
    }

    async fn find_all(&self) -> Result<Vec<ScheduleConfig>, AppError> {
        let rows = sqlx::query_as::<_, ScheduleConfigRow>(
            "SELECT id, task_name, cron_expression FROM schedule_configs ORDER BY task_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScheduleConfig::from).collect())
    }

    async fn create(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError> {
        let row = sqlx::query_as::<_, ScheduleConfigRow>(
            r#"
            INSERT INTO schedule_configs (id, task_name, cron_expression)
            VALUES ($1, $2, $3)
            RETURNING id, task_name, cron_expression
            "#,
        )
        .bind(config.id)
        .bind(&config.task_name)
        .bind(&config.cron_expression)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A schedule for this task already exists"))?;

        Ok(row.into())
    }

    async fn update(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError> {
        let row = sqlx::query_as::<_, ScheduleConfigRow>(
            r#"
            UPDATE schedule_configs
            SET task_name = $2, cron_expression = $3
            WHERE id = $1
            RETURNING id, task_name, cron_expression
            "#,
        )
        .bind(config.id)
        .bind(&config.task_name)
        .bind(&config.cron_expression)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A schedule for this task already exists"))?
        .ok_or_else(|| AppError::not_found("ScheduleConfig", config.id))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("ScheduleConfig", id));
        }

        Ok(())
    }
}
