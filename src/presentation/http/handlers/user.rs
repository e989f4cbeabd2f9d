//! User Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{EmailQuery, LoginRequest, UserDto};
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserDto>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    validate(&body)?;

    let user = state.users.register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDto>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    Ok(Json(state.users.get_user(user_id).await?))
}

/// Get user by email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<UserDto>, AppError> {
    Ok(Json(state.users.get_user_by_email(&query.email).await?))
}

/// Update user
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<UserDto>,
) -> Result<Json<UserDto>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    validate(&body)?;

    Ok(Json(state.users.update_user(user_id, body).await?))
}

/// Delete user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    state.users.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Password login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<UserDto>, AppError> {
    validate(&body)?;

    let user = state.users.authenticate(&body.email, &body.password).await?;
    Ok(Json(user))
}
