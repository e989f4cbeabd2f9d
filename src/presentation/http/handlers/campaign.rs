//! Campaign Handlers

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{CampaignDto, CampaignQuery, InteractionRequest};
use crate::domain::CampaignType;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Create a campaign
pub async fn create_campaign(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CampaignDto>,
) -> Result<(StatusCode, Json<CampaignDto>), AppError> {
    validate(&body)?;

    let campaign = state.campaigns.create_campaign(body).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// List campaigns, optionally by `?type=`
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignQuery>,
) -> Result<Json<Vec<CampaignDto>>, AppError> {
    let campaigns = match query.campaign_type.as_deref() {
        Some(raw) => {
            let campaign_type: CampaignType = raw.parse()?;
            state.campaigns.list_by_type(campaign_type).await?
        }
        None => state.campaigns.list_campaigns().await?,
    };
    Ok(Json(campaigns))
}

/// Get campaign by ID
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignDto>, AppError> {
    let campaign_id = parse_id(&campaign_id, "campaign")?;
    Ok(Json(state.campaigns.get_campaign(campaign_id).await?))
}

/// Update campaign
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    JsonBody(body): JsonBody<CampaignDto>,
) -> Result<Json<CampaignDto>, AppError> {
    let campaign_id = parse_id(&campaign_id, "campaign")?;
    validate(&body)?;

    Ok(Json(state.campaigns.update_campaign(campaign_id, body).await?))
}

/// Delete campaign
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let campaign_id = parse_id(&campaign_id, "campaign")?;
    state.campaigns.delete_campaign(campaign_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record customer interactions; an empty body counts one
pub async fn record_interaction(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    body: Bytes,
) -> Result<Json<CampaignDto>, AppError> {
    let campaign_id = parse_id(&campaign_id, "campaign")?;
    let body: InteractionRequest = if body.is_empty() {
        InteractionRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };
    validate(&body)?;

    let campaign = state
        .campaigns
        .record_interaction(campaign_id, body.count.unwrap_or(1))
        .await?;
    Ok(Json(campaign))
}
