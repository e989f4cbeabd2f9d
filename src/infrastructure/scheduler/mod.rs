//! Background Task Scheduler
//!
//! Cron jobs for follow-up reminders and notification dispatch. Each
//! task's cron expression is read from its `ScheduleConfig` row at
//! startup, falling back to the built-in default.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::application::services::{
    validate_cron, NotificationService, SalesService, ScheduleService,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

pub const FOLLOW_UP_REMINDERS: &str = "follow-up-reminders";
pub const DEFAULT_FOLLOW_UP_CRON: &str = "0 */5 * * * *";

pub const NOTIFICATION_DISPATCH: &str = "notification-dispatch";
pub const DEFAULT_DISPATCH_CRON: &str = "0 * * * * *";

/// Starts the task scheduler
///
/// # Arguments
/// - `schedules`: source of per-task cron expressions
/// - `sales`: runs follow-up reminders
/// - `notifications`: dispatches pending notifications
pub async fn start_scheduler(
    schedules: Arc<dyn ScheduleService>,
    sales: Arc<dyn SalesService>,
    notifications: Arc<dyn NotificationService>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let follow_up_cron =
        resolve_cron(schedules.as_ref(), FOLLOW_UP_REMINDERS, DEFAULT_FOLLOW_UP_CRON).await;
    let follow_up_job = Job::new_async(follow_up_cron.as_str(), move |_uuid, _lock| {
        let sales = sales.clone();
        Box::pin(async move {
            run_task(FOLLOW_UP_REMINDERS, sales.process_follow_ups(Utc::now())).await;
        })
    })?;
    scheduler.add(follow_up_job).await?;

    let dispatch_cron =
        resolve_cron(schedules.as_ref(), NOTIFICATION_DISPATCH, DEFAULT_DISPATCH_CRON).await;
    let dispatch_job = Job::new_async(dispatch_cron.as_str(), move |_uuid, _lock| {
        let notifications = notifications.clone();
        Box::pin(async move {
            run_task(NOTIFICATION_DISPATCH, notifications.dispatch_pending()).await;
        })
    })?;
    scheduler.add(dispatch_job).await?;

    scheduler.start().await?;

    tracing::info!(
        follow_up = %follow_up_cron,
        dispatch = %dispatch_cron,
        "Task scheduler started"
    );

    Ok(scheduler)
}

/// Stored cron for `task`, or `default` when missing, unreadable or invalid.
async fn resolve_cron(schedules: &dyn ScheduleService, task: &str, default: &str) -> String {
    let cron = match schedules.cron_for(task, default).await {
        Ok(cron) => cron,
        Err(e) => {
            tracing::warn!(task, "Could not load schedule, using default: {}", e);
            return default.to_string();
        }
    };

    if let Err(e) = validate_cron(&cron) {
        tracing::warn!(task, cron = %cron, "Ignoring stored schedule: {}", e);
        return default.to_string();
    }
    cron
}

/// One tick of a task. Errors are logged; the next tick runs regardless.
async fn run_task<T, F>(task: &'static str, work: F)
where
    T: std::fmt::Debug,
    F: Future<Output = Result<T, AppError>>,
{
    match work.await {
        Ok(outcome) => {
            tracing::debug!(task, ?outcome, "Scheduled task finished");
            metrics::record_task_run(task, true);
        }
        Err(e) => {
            tracing::error!(task, "Scheduled task failed: {}", e);
            metrics::record_task_run(task, false);
        }
    }
}
