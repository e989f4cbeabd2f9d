//! Schedule Service
//!
//! Cron expressions for background tasks, keyed by task name.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_cron_scheduler::Job;

use crate::application::dto::ScheduleConfigDto;
use crate::domain::{ScheduleConfig, ScheduleConfigRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Reject expressions the scheduler cannot run (six fields, seconds first).
pub fn validate_cron(expression: &str) -> Result<(), AppError> {
    Job::new(expression, |_uuid, _lock| {})
        .map(|_| ())
        .map_err(|e| {
            AppError::Validation(format!(
                "cronExpression: invalid cron expression '{}': {}",
                expression, e
            ))
        })
}

/// Schedule service trait
#[async_trait]
pub trait ScheduleService: Send + Sync {
    async fn create_schedule(&self, config: ScheduleConfigDto)
        -> Result<ScheduleConfigDto, AppError>;

    async fn get_schedule(&self, id: i64) -> Result<ScheduleConfigDto, AppError>;

    async fn get_by_task_name(&self, task_name: &str) -> Result<ScheduleConfigDto, AppError>;

    async fn list_schedules(&self) -> Result<Vec<ScheduleConfigDto>, AppError>;

    async fn update_schedule(
        &self,
        id: i64,
        config: ScheduleConfigDto,
    ) -> Result<ScheduleConfigDto, AppError>;

    async fn delete_schedule(&self, id: i64) -> Result<(), AppError>;

    /// Configured cron for `task_name`, or `default` when none is stored.
    async fn cron_for(&self, task_name: &str, default: &str) -> Result<String, AppError>;
}

/// ScheduleService implementation
pub struct ScheduleServiceImpl<R>
where
    R: ScheduleConfigRepository + ?Sized,
{
    schedule_repo: Arc<R>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<R> ScheduleServiceImpl<R>
where
    R: ScheduleConfigRepository + ?Sized,
{
    pub fn new(schedule_repo: Arc<R>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            schedule_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<R> ScheduleService for ScheduleServiceImpl<R>
where
    R: ScheduleConfigRepository + ?Sized + 'static,
{
    async fn create_schedule(
        &self,
        config: ScheduleConfigDto,
    ) -> Result<ScheduleConfigDto, AppError> {
        validate_cron(&config.cron_expression)?;

        let mut entity = ScheduleConfig::from(config);
        if entity.id == 0 {
            entity.id = self.id_generator.generate();
        }

        let created = self.schedule_repo.create(&entity).await?;
        tracing::info!(
            task = %created.task_name,
            cron = %created.cron_expression,
            "Schedule configured"
        );

        Ok(ScheduleConfigDto::from(created))
    }

    async fn get_schedule(&self, id: i64) -> Result<ScheduleConfigDto, AppError> {
        self.schedule_repo
            .find_by_id(id)
            .await?
            .map(ScheduleConfigDto::from)
            .ok_or_else(|| AppError::not_found("ScheduleConfig", id))
    }

    async fn get_by_task_name(&self, task_name: &str) -> Result<ScheduleConfigDto, AppError> {
        self.schedule_repo
            .find_by_task_name(task_name)
            .await?
            .map(ScheduleConfigDto::from)
            .ok_or_else(|| AppError::not_found("ScheduleConfig", task_name))
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleConfigDto>, AppError> {
        let configs = self.schedule_repo.find_all().await?;
        Ok(configs.into_iter().map(ScheduleConfigDto::from).collect())
    }

    async fn update_schedule(
        &self,
        id: i64,
        config: ScheduleConfigDto,
    ) -> Result<ScheduleConfigDto, AppError> {
        validate_cron(&config.cron_expression)?;

        let mut entity = ScheduleConfig::from(config);
        entity.id = id;

        let updated = self.schedule_repo.update(&entity).await?;
        Ok(ScheduleConfigDto::from(updated))
    }

    async fn delete_schedule(&self, id: i64) -> Result<(), AppError> {
        self.schedule_repo.delete(id).await
    }

    async fn cron_for(&self, task_name: &str, default: &str) -> Result<String, AppError> {
        Ok(self
            .schedule_repo
            .find_by_task_name(task_name)
            .await?
            .map(|config| config.cron_expression)
            .unwrap_or_else(|| default.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryScheduleConfigRepository;
    use test_case::test_case;

    fn service() -> ScheduleServiceImpl<InMemoryScheduleConfigRepository> {
        ScheduleServiceImpl::new(
            Arc::new(InMemoryScheduleConfigRepository::new()),
            Arc::new(SnowflakeGenerator::default()),
        )
    }

    fn config(task: &str, cron: &str) -> ScheduleConfigDto {
        ScheduleConfigDto {
            id: None,
            task_name: task.into(),
            cron_expression: cron.into(),
        }
    }

    #[test_case("0 * * * * *" ; "every minute")]
    #[test_case("0 */5 * * * *" ; "every five minutes")]
    #[test_case("0 30 9 * * 1-5" ; "weekday mornings")]
    fn test_valid_cron(expression: &str) {
        assert!(validate_cron(expression).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("every minute" ; "prose")]
    #[test_case("0 99 * * * *" ; "minute out of range")]
    fn test_invalid_cron(expression: &str) {
        assert!(matches!(validate_cron(expression), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_cron() {
        let err = service()
            .create_schedule(config("follow-up-reminders", "whenever"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cron_for_falls_back_to_default() {
        let service = service();
        assert_eq!(
            service
                .cron_for("notification-dispatch", "0 * * * * *")
                .await
                .unwrap(),
            "0 * * * * *"
        );

        service
            .create_schedule(config("notification-dispatch", "0 */10 * * * *"))
            .await
            .unwrap();
        assert_eq!(
            service
                .cron_for("notification-dispatch", "0 * * * * *")
                .await
                .unwrap(),
            "0 */10 * * * *"
        );
    }

    #[tokio::test]
    async fn test_duplicate_task_name_conflicts() {
        let service = service();
        service
            .create_schedule(config("follow-up-reminders", "0 */5 * * * *"))
            .await
            .unwrap();

        let err = service
            .create_schedule(config("follow-up-reminders", "0 */15 * * * *"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_by_task_name() {
        let service = service();
        service
            .create_schedule(config("follow-up-reminders", "0 */5 * * * *"))
            .await
            .unwrap();

        let found = service.get_by_task_name("follow-up-reminders").await.unwrap();
        assert_eq!(found.cron_expression, "0 */5 * * * *");
        assert!(service
            .get_by_task_name("missing")
            .await
            .unwrap_err()
            .is_not_found());
    }
}
