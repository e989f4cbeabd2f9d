//! Support Service
//!
//! Customer support tickets. New tickets must name an existing customer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::SupportTicketDto;
use crate::domain::{SupportTicket, SupportTicketRepository, TicketStatus};
use crate::infrastructure::clients::CustomerClient;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Support service trait
#[async_trait]
pub trait SupportService: Send + Sync {
    async fn create_ticket(&self, ticket: SupportTicketDto) -> Result<SupportTicketDto, AppError>;

    async fn get_ticket(&self, ticket_id: i64) -> Result<SupportTicketDto, AppError>;

    async fn list_tickets(&self) -> Result<Vec<SupportTicketDto>, AppError>;

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<SupportTicketDto>, AppError>;

    async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<SupportTicketDto>, AppError>;

    async fn update_status(
        &self,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<SupportTicketDto, AppError>;

    async fn update_ticket(
        &self,
        ticket_id: i64,
        ticket: SupportTicketDto,
    ) -> Result<SupportTicketDto, AppError>;

    async fn delete_ticket(&self, ticket_id: i64) -> Result<(), AppError>;
}

/// SupportService implementation
pub struct SupportServiceImpl<T>
where
    T: SupportTicketRepository + ?Sized,
{
    ticket_repo: Arc<T>,
    customer_client: Arc<dyn CustomerClient>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<T> SupportServiceImpl<T>
where
    T: SupportTicketRepository + ?Sized,
{
    pub fn new(
        ticket_repo: Arc<T>,
        customer_client: Arc<dyn CustomerClient>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            ticket_repo,
            customer_client,
            id_generator,
        }
    }

    async fn find(&self, ticket_id: i64) -> Result<SupportTicket, AppError> {
        self.ticket_repo
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("SupportTicket", ticket_id))
    }
}

#[async_trait]
impl<T> SupportService for SupportServiceImpl<T>
where
    T: SupportTicketRepository + ?Sized + 'static,
{
    async fn create_ticket(&self, ticket: SupportTicketDto) -> Result<SupportTicketDto, AppError> {
        if self
            .customer_client
            .get_customer(ticket.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("CustomerProfile", ticket.customer_id));
        }

        let created_at = ticket.created_at;
        let mut entity = SupportTicket::from(ticket);
        if entity.ticket_id == 0 {
            entity.ticket_id = self.id_generator.generate();
        }
        entity.created_at = created_at.unwrap_or_else(Utc::now);

        let created = self.ticket_repo.create(&entity).await?;
        tracing::info!(
            ticket_id = created.ticket_id,
            customer_id = created.customer_id,
            status = %created.status,
            "Support ticket opened"
        );

        Ok(SupportTicketDto::from(created))
    }

    async fn get_ticket(&self, ticket_id: i64) -> Result<SupportTicketDto, AppError> {
        self.find(ticket_id).await.map(SupportTicketDto::from)
    }

    async fn list_tickets(&self) -> Result<Vec<SupportTicketDto>, AppError> {
        let tickets = self.ticket_repo.find_all().await?;
        Ok(tickets.into_iter().map(SupportTicketDto::from).collect())
    }

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<SupportTicketDto>, AppError> {
        let tickets = self.ticket_repo.find_by_customer_id(customer_id).await?;
        Ok(tickets.into_iter().map(SupportTicketDto::from).collect())
    }

    async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<SupportTicketDto>, AppError> {
        let tickets = self.ticket_repo.find_by_status(status).await?;
        Ok(tickets.into_iter().map(SupportTicketDto::from).collect())
    }

    async fn update_status(
        &self,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<SupportTicketDto, AppError> {
        let mut ticket = self.find(ticket_id).await?;
        tracing::debug!(ticket_id, from = %ticket.status, to = %status, "Ticket status change");
        ticket.status = status;

        let updated = self.ticket_repo.update(&ticket).await?;
        Ok(SupportTicketDto::from(updated))
    }

    async fn update_ticket(
        &self,
        ticket_id: i64,
        ticket: SupportTicketDto,
    ) -> Result<SupportTicketDto, AppError> {
        let existing = self.find(ticket_id).await?;

        let created_at = ticket.created_at;
        let mut entity = SupportTicket::from(ticket);
        entity.ticket_id = ticket_id;
        entity.created_at = created_at.unwrap_or(existing.created_at);

        let updated = self.ticket_repo.update(&entity).await?;
        Ok(SupportTicketDto::from(updated))
    }

    async fn delete_ticket(&self, ticket_id: i64) -> Result<(), AppError> {
        self.ticket_repo.delete(ticket_id).await
    }
}
