//! # Domain Entities
//!
//! Core domain entities representing the CRM's business records.
//! All entities map directly to their corresponding database tables.
//!
//! ## Entities
//!
//! - **User**: Back-office operator account
//! - **CustomerProfile**: A customer with contact info, purchases and segments
//! - **Campaign**: A marketing campaign
//! - **Notification**: A message addressed to a customer
//! - **SalesOpportunity**: A deal moving through the sales pipeline
//! - **SupportTicket**: A customer support case
//! - **ScheduleConfig**: Cron expression of a background task
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle. Entities reference each other only by
//! `customer_id` value.

mod user;
mod customer_profile;
mod campaign;
mod notification;
mod sales_opportunity;
mod support_ticket;
mod schedule_config;

pub use user::{User, UserRepository, UserRole};

pub use customer_profile::{CustomerProfile, CustomerProfileRepository};

pub use campaign::{Campaign, CampaignRepository, CampaignType};

pub use notification::{Notification, NotificationRepository, NotificationStatus, NotificationType};

pub use sales_opportunity::{SalesOpportunity, SalesOpportunityRepository, SalesStage};

pub use support_ticket::{SupportTicket, SupportTicketRepository, TicketStatus};

pub use schedule_config::{ScheduleConfig, ScheduleConfigRepository};
