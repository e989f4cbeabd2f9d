//! Analytics Report Handlers

use axum::{extract::State, Json};

use crate::application::dto::{CampaignReport, NotificationReport, SalesPipelineReport, SupportReport};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn sales_report(
    State(state): State<AppState>,
) -> Result<Json<SalesPipelineReport>, AppError> {
    Ok(Json(state.reports.sales_report().await?))
}

pub async fn notification_report(
    State(state): State<AppState>,
) -> Result<Json<NotificationReport>, AppError> {
    Ok(Json(state.reports.notification_report().await?))
}

pub async fn support_report(State(state): State<AppState>) -> Result<Json<SupportReport>, AppError> {
    Ok(Json(state.reports.support_report().await?))
}

pub async fn campaign_report(
    State(state): State<AppState>,
) -> Result<Json<CampaignReport>, AppError> {
    Ok(Json(state.reports.campaign_report().await?))
}
