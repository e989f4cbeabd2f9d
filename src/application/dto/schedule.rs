//! Schedule configuration DTOs and mapping.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ScheduleConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfigDto {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Task name must be 1-100 characters"))]
    pub task_name: String,

    #[validate(length(min = 1, max = 100, message = "Cron expression must be 1-100 characters"))]
    pub cron_expression: String,
}

impl From<ScheduleConfig> for ScheduleConfigDto {
    fn from(config: ScheduleConfig) -> Self {
        Self {
            id: Some(config.id),
            task_name: config.task_name,
            cron_expression: config.cron_expression,
        }
    }
}

impl From<ScheduleConfigDto> for ScheduleConfig {
    fn from(dto: ScheduleConfigDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            task_name: dto.task_name,
            cron_expression: dto.cron_expression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_fields() {
        let config = ScheduleConfig {
            id: 4,
            task_name: "notification-dispatch".into(),
            cron_expression: "0 * * * * *".into(),
        };
        assert_eq!(ScheduleConfig::from(ScheduleConfigDto::from(config.clone())), config);
    }
}
