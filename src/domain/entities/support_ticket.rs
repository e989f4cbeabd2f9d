//! Support ticket entity and repository trait.
//!
//! Maps to the `support_tickets` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::string_enum::string_enum;
use crate::shared::error::AppError;

string_enum! {
    /// Ticket lifecycle state.
    pub enum TicketStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// A customer support case.
///
/// Maps to the `support_tickets` table:
/// - ticket_id: BIGINT PRIMARY KEY
/// - customer_id: BIGINT NOT NULL
/// - subject: VARCHAR(200) NOT NULL
/// - description: TEXT NULL
/// - status: VARCHAR(20) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub ticket_id: i64,
    pub customer_id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl SupportTicket {
    pub fn is_open(&self) -> bool {
        matches!(self.status, TicketStatus::Open | TicketStatus::InProgress)
    }
}

/// Repository trait for SupportTicket data access operations.
#[async_trait]
pub trait SupportTicketRepository: Send + Sync {
    async fn find_by_id(&self, ticket_id: i64) -> Result<Option<SupportTicket>, AppError>;

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SupportTicket>, AppError>;

    /// Tickets whose status equals `status`.
    async fn find_by_status(&self, status: TicketStatus) -> Result<Vec<SupportTicket>, AppError>;

    async fn find_all(&self) -> Result<Vec<SupportTicket>, AppError>;

    async fn create(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError>;

    async fn update(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError>;

    async fn delete(&self, ticket_id: i64) -> Result<(), AppError>;
}
