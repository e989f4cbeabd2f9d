//! Support Ticket Repository Implementation
//!
//! PostgreSQL implementation of the SupportTicketRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{SupportTicket, SupportTicketRepository, TicketStatus};
use crate::shared::error::{map_unique_violation, AppError};

#[derive(Debug, sqlx::FromRow)]
struct SupportTicketRow {
    ticket_id: i64,
    customer_id: i64,
    subject: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SupportTicketRow> for SupportTicket {
    type Error = AppError;

    fn try_from(row: SupportTicketRow) -> Result<Self, Self::Error> {
        Ok(SupportTicket {
            ticket_id: row.ticket_id,
            customer_id: row.customer_id,
            subject: row.subject,
            description: row.description,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

const TICKET_COLUMNS: &str = "ticket_id, customer_id, subject, description, status, created_at";

/// PostgreSQL support ticket repository.
#[derive(Clone)]
pub struct PgSupportTicketRepository {
    pool: PgPool,
}

impl PgSupportTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn convert_all(rows: Vec<SupportTicketRow>) -> Result<Vec<SupportTicket>, AppError> {
    rows.into_iter().map(SupportTicket::try_from).collect()
}

#[async_trait]
impl SupportTicketRepository for PgSupportTicketRepository {
    async fn find_by_id(&self, ticket_id: i64) -> Result<Option<SupportTicket>, AppError> {
        sqlx::query_as::<_, SupportTicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets WHERE ticket_id = $1"
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await?
        .map(SupportTicket::try_from)
        .transpose()
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SupportTicket>, AppError> {
        let rows = sqlx::query_as::<_, SupportTicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets WHERE customer_id = $1 ORDER BY ticket_id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_by_status(&self, status: TicketStatus) -> Result<Vec<SupportTicket>, AppError> {
        let rows = sqlx::query_as::<_, SupportTicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets WHERE status = $1 ORDER BY ticket_id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn find_all(&self) -> Result<Vec<SupportTicket>, AppError> {
        let rows = sqlx::query_as::<_, SupportTicketRow>(&format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets ORDER BY ticket_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        convert_all(rows)
    }

    async fn create(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError> {
        let row = sqlx::query_as::<_, SupportTicketRow>(&format!(
            r#"
            INSERT INTO support_tickets (ticket_id, customer_id, subject, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TICKET_COLUMNS}
            "#
        ))
        .bind(ticket.ticket_id)
        .bind(ticket.customer_id)
        .bind(&ticket.subject)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Support ticket with this id already exists"))?;

        row.try_into()
    }

    async fn update(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError> {
        let row = sqlx::query_as::<_, SupportTicketRow>(&format!(
            r#"
            UPDATE support_tickets
            SET customer_id = $2, subject = $3, description = $4, status = $5
            WHERE ticket_id = $1
            RETURNING {TICKET_COLUMNS}
            "#
        ))
        .bind(ticket.ticket_id)
        .bind(ticket.customer_id)
        .bind(&ticket.subject)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("SupportTicket", ticket.ticket_id))?;

        row.try_into()
    }

    async fn delete(&self, ticket_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM support_tickets WHERE ticket_id = $1")
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("SupportTicket", ticket_id));
        }

        Ok(())
    }
}
