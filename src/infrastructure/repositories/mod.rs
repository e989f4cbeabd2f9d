//! Repository Implementations
//!
//! Concrete implementations of the domain repository traits.
//!
//! - **PostgreSQL** (`Pg*Repository`): one table per entity, sqlx queries
//! - **In-memory** (`InMemory*Repository`): process-local maps, used for
//!   `database.backend = "memory"` and tests
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use crm_platform::infrastructure::repositories::Repositories;
//!
//! let repos = Repositories::postgres(pool.clone());
//! let customer = repos.customers.find_by_id(42).await?;
//! ```

pub mod campaign_repository;
pub mod customer_profile_repository;
pub mod memory;
pub mod notification_repository;
pub mod sales_opportunity_repository;
pub mod schedule_config_repository;
pub mod support_ticket_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    CampaignRepository, CustomerProfileRepository, NotificationRepository,
    SalesOpportunityRepository, ScheduleConfigRepository, SupportTicketRepository,
    UserRepository,
};

pub use campaign_repository::PgCampaignRepository;
pub use customer_profile_repository::PgCustomerProfileRepository;
pub use memory::{
    InMemoryCampaignRepository, InMemoryCustomerProfileRepository,
    InMemoryNotificationRepository, InMemorySalesOpportunityRepository,
    InMemoryScheduleConfigRepository, InMemorySupportTicketRepository, InMemoryUserRepository,
};
pub use notification_repository::PgNotificationRepository;
pub use sales_opportunity_repository::PgSalesOpportunityRepository;
pub use schedule_config_repository::PgScheduleConfigRepository;
pub use support_ticket_repository::PgSupportTicketRepository;
pub use user_repository::PgUserRepository;

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub customers: Arc<dyn CustomerProfileRepository>,
    pub campaigns: Arc<dyn CampaignRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub opportunities: Arc<dyn SalesOpportunityRepository>,
    pub tickets: Arc<dyn SupportTicketRepository>,
    pub schedules: Arc<dyn ScheduleConfigRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            customers: Arc::new(PgCustomerProfileRepository::new(pool.clone())),
            campaigns: Arc::new(PgCampaignRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            opportunities: Arc::new(PgSalesOpportunityRepository::new(pool.clone())),
            tickets: Arc::new(PgSupportTicketRepository::new(pool.clone())),
            schedules: Arc::new(PgScheduleConfigRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            customers: Arc::new(InMemoryCustomerProfileRepository::new()),
            campaigns: Arc::new(InMemoryCampaignRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            opportunities: Arc::new(InMemorySalesOpportunityRepository::new()),
            tickets: Arc::new(InMemorySupportTicketRepository::new()),
            schedules: Arc::new(InMemoryScheduleConfigRepository::new()),
        }
    }
}
