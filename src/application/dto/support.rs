//! Support ticket DTOs and mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{SupportTicket, TicketStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicketDto {
    #[serde(rename = "ticketID")]
    pub ticket_id: Option<i64>,

    #[serde(rename = "customerID")]
    pub customer_id: i64,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    pub description: Option<String>,

    #[serde(default)]
    pub status: TicketStatus,

    pub created_at: Option<DateTime<Utc>>,
}

impl From<SupportTicket> for SupportTicketDto {
    fn from(ticket: SupportTicket) -> Self {
        Self {
            ticket_id: Some(ticket.ticket_id),
            customer_id: ticket.customer_id,
            subject: ticket.subject,
            description: ticket.description,
            status: ticket.status,
            created_at: Some(ticket.created_at),
        }
    }
}

impl From<SupportTicketDto> for SupportTicket {
    fn from(dto: SupportTicketDto) -> Self {
        Self {
            ticket_id: dto.ticket_id.unwrap_or_default(),
            customer_id: dto.customer_id,
            subject: dto.subject,
            description: dto.description,
            status: dto.status,
            created_at: dto.created_at.unwrap_or_default(),
        }
    }
}

/// `?status=&customerId=` filters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQuery {
    pub status: Option<String>,
    pub customer_id: Option<i64>,
}

/// Change a ticket's status
#[derive(Debug, Deserialize)]
pub struct TicketStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_fields() {
        let ticket = SupportTicket {
            ticket_id: 8,
            customer_id: 9,
            subject: "Invoice missing".into(),
            description: Some("March invoice never arrived".into()),
            status: TicketStatus::InProgress,
            created_at: Utc::now(),
        };
        assert_eq!(SupportTicket::from(SupportTicketDto::from(ticket.clone())), ticket);
    }
}
