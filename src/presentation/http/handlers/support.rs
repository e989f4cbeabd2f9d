//! Support Ticket Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{SupportTicketDto, TicketQuery, TicketStatusRequest};
use crate::domain::TicketStatus;
use crate::presentation::http::extractors::{parse_id, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Open a ticket
pub async fn create_ticket(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SupportTicketDto>,
) -> Result<(StatusCode, Json<SupportTicketDto>), AppError> {
    validate(&body)?;

    let ticket = state.support.create_ticket(body).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// List tickets, filtered by `?status=` or `?customerId=`
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> Result<Json<Vec<SupportTicketDto>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<TicketStatus>)
        .transpose()?;

    let mut tickets = match (status, query.customer_id) {
        (Some(status), _) => state.support.list_by_status(status).await?,
        (None, Some(customer_id)) => state.support.list_by_customer(customer_id).await?,
        (None, None) => state.support.list_tickets().await?,
    };
    if let (Some(_), Some(customer_id)) = (status, query.customer_id) {
        tickets.retain(|t| t.customer_id == customer_id);
    }

    Ok(Json(tickets))
}

/// Get ticket by ID
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<Json<SupportTicketDto>, AppError> {
    let ticket_id = parse_id(&ticket_id, "ticket")?;
    Ok(Json(state.support.get_ticket(ticket_id).await?))
}

/// Update ticket
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    JsonBody(body): JsonBody<SupportTicketDto>,
) -> Result<Json<SupportTicketDto>, AppError> {
    let ticket_id = parse_id(&ticket_id, "ticket")?;
    validate(&body)?;

    Ok(Json(state.support.update_ticket(ticket_id, body).await?))
}

/// Change ticket status
pub async fn update_ticket_status(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    JsonBody(body): JsonBody<TicketStatusRequest>,
) -> Result<Json<SupportTicketDto>, AppError> {
    let ticket_id = parse_id(&ticket_id, "ticket")?;
    let status: TicketStatus = body.status.parse()?;

    Ok(Json(state.support.update_status(ticket_id, status).await?))
}

/// Delete ticket
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ticket_id = parse_id(&ticket_id, "ticket")?;
    state.support.delete_ticket(ticket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
