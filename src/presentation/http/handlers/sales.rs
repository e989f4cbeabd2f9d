//! Sales Opportunity Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    CustomerProfileDto, OpportunityQuery, SalesOpportunityDto, StageUpdateRequest,
};
use crate::domain::SalesStage;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Create an opportunity
pub async fn create_opportunity(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SalesOpportunityDto>,
) -> Result<(StatusCode, Json<SalesOpportunityDto>), AppError> {
    validate(&body)?;

    let opportunity = state.sales.create_opportunity(body).await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

/// List opportunities, filtered by `?stage=` or `?customerId=`
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Json<Vec<SalesOpportunityDto>>, AppError> {
    let stage = query
        .stage
        .as_deref()
        .map(str::parse::<SalesStage>)
        .transpose()?;

    let mut opportunities = match (stage, query.customer_id) {
        (Some(stage), _) => state.sales.list_by_stage(stage).await?,
        (None, Some(customer_id)) => state.sales.list_by_customer(customer_id).await?,
        (None, None) => state.sales.list_opportunities().await?,
    };
    if let (Some(_), Some(customer_id)) = (stage, query.customer_id) {
        opportunities.retain(|o| o.customer_id == customer_id);
    }

    Ok(Json(opportunities))
}

/// Get opportunity by ID
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<SalesOpportunityDto>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunity")?;
    Ok(Json(state.sales.get_opportunity(opportunity_id).await?))
}

/// Update opportunity
pub async fn update_opportunity(
    State(state): State<AppState>,
    Path(opportunity_id): Path<String>,
    JsonBody(body): JsonBody<SalesOpportunityDto>,
) -> Result<Json<SalesOpportunityDto>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunity")?;
    validate(&body)?;

    Ok(Json(state.sales.update_opportunity(opportunity_id, body).await?))
}

/// Move opportunity to another stage
pub async fn update_stage(
    State(state): State<AppState>,
    Path(opportunity_id): Path<String>,
    JsonBody(body): JsonBody<StageUpdateRequest>,
) -> Result<Json<SalesOpportunityDto>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunity")?;
    let stage: SalesStage = body.sales_stage.parse()?;

    Ok(Json(state.sales.advance_stage(opportunity_id, stage).await?))
}

/// Delete opportunity
pub async fn delete_opportunity(
    State(state): State<AppState>,
    Path(opportunity_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunity")?;
    state.sales.delete_opportunity(opportunity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The opportunity's customer, via the customer service
pub async fn get_opportunity_customer(
    State(state): State<AppState>,
    Path(opportunity_id): Path<String>,
) -> Result<Json<CustomerProfileDto>, AppError> {
    let opportunity_id = parse_id(&opportunity_id, "opportunity")?;
    Ok(Json(state.sales.customer_of(opportunity_id).await?))
}
