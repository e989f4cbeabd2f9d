//! Schedule Configuration Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::ScheduleConfigDto;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

pub async fn create_schedule(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ScheduleConfigDto>,
) -> Result<(StatusCode, Json<ScheduleConfigDto>), AppError> {
    validate(&body)?;

    let schedule = state.schedules.create_schedule(body).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn list_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleConfigDto>>, AppError> {
    Ok(Json(state.schedules.list_schedules().await?))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleConfigDto>, AppError> {
    let id = parse_id(&id, "schedule")?;
    Ok(Json(state.schedules.get_schedule(id).await?))
}

pub async fn get_schedule_by_task(
    State(state): State<AppState>,
    Path(task_name): Path<String>,
) -> Result<Json<ScheduleConfigDto>, AppError> {
    Ok(Json(state.schedules.get_by_task_name(&task_name).await?))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ScheduleConfigDto>,
) -> Result<Json<ScheduleConfigDto>, AppError> {
    let id = parse_id(&id, "schedule")?;
    validate(&body)?;

    Ok(Json(state.schedules.update_schedule(id, body).await?))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "schedule")?;
    state.schedules.delete_schedule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
