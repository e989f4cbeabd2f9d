//! Customer Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{CustomerProfileDto, PurchaseRequest, SegmentsRequest};
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Create a customer profile
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CustomerProfileDto>,
) -> Result<(StatusCode, Json<CustomerProfileDto>), AppError> {
    validate(&body)?;

    let customer = state.customers.create_customer(body).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// List customer profiles
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerProfileDto>>, AppError> {
    Ok(Json(state.customers.list_customers().await?))
}

/// Get customer profile by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerProfileDto>, AppError> {
    let customer_id = parse_id(&customer_id, "customer")?;
    Ok(Json(state.customers.get_customer(customer_id).await?))
}

/// Update customer profile
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    JsonBody(body): JsonBody<CustomerProfileDto>,
) -> Result<Json<CustomerProfileDto>, AppError> {
    let customer_id = parse_id(&customer_id, "customer")?;
    validate(&body)?;

    Ok(Json(state.customers.update_customer(customer_id, body).await?))
}

/// Delete customer profile
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let customer_id = parse_id(&customer_id, "customer")?;
    state.customers.delete_customer(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Append a purchase
pub async fn add_purchase(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    JsonBody(body): JsonBody<PurchaseRequest>,
) -> Result<Json<CustomerProfileDto>, AppError> {
    let customer_id = parse_id(&customer_id, "customer")?;
    validate(&body)?;

    Ok(Json(state.customers.add_purchase(customer_id, body.item).await?))
}

/// Replace segmentation data
pub async fn update_segments(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    JsonBody(body): JsonBody<SegmentsRequest>,
) -> Result<Json<CustomerProfileDto>, AppError> {
    let customer_id = parse_id(&customer_id, "customer")?;
    Ok(Json(state.customers.segment(customer_id, body.segments).await?))
}
