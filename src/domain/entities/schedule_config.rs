//! Schedule configuration entity and repository trait.
//!
//! Maps to the `schedule_configs` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Cron expression for one named background task.
///
/// Maps to the `schedule_configs` table:
/// - id: BIGINT PRIMARY KEY
/// - task_name: VARCHAR(100) NOT NULL UNIQUE
/// - cron_expression: VARCHAR(100) NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub id: i64,
    pub task_name: String,
    pub cron_expression: String,
}

/// Repository trait for ScheduleConfig data access operations.
#[async_trait]
pub trait ScheduleConfigRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleConfig>, AppError>;

    /// The config for `task_name`, if one exists.
    async fn find_by_task_name(&self, task_name: &str) -> Result<Option<ScheduleConfig>, AppError>;

    async fn find_all(&self) -> Result<Vec<ScheduleConfig>, AppError>;

    /// Insert a config. Fails with `Conflict` when the task already has one.
    async fn create(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError>;

    async fn update(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
