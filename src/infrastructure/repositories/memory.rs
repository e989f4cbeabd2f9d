//! In-Memory Repository Implementations
//!
//! Process-local storage behind the same repository traits as PostgreSQL.
//! Selected with `database.backend = "memory"` and used by the test suite.
//! Each table is a `BTreeMap` keyed by id under one `RwLock`, so unique
//! checks and writes are atomic per table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{
    Campaign, CampaignRepository, CampaignType, CustomerProfile, CustomerProfileRepository,
    Notification, NotificationRepository, NotificationStatus, SalesOpportunity,
    SalesOpportunityRepository, SalesStage, ScheduleConfig, ScheduleConfigRepository,
    SupportTicket, SupportTicketRepository, TicketStatus, User, UserRepository,
};
use crate::shared::error::AppError;

/// One table: id -> row.
struct Table<T> {
    resource: &'static str,
    rows: RwLock<BTreeMap<i64, T>>,
}

impl<T: Clone> Table<T> {
    fn new(resource: &'static str) -> Self {
        Self {
            resource,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| pred(row)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().values().filter(|row| pred(row)).cloned().collect()
    }

    fn all(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    /// Insert `row`; `clashes` flags an existing row violating a unique constraint.
    fn insert(
        &self,
        id: i64,
        row: &T,
        clashes: impl Fn(&T) -> bool,
        conflict: &str,
    ) -> Result<T, AppError> {
        let mut rows = self.rows.write();
        if rows.contains_key(&id) {
            return Err(AppError::Conflict(format!(
                "{} with id {} already exists",
                self.resource, id
            )));
        }
        if rows.values().any(|existing| clashes(existing)) {
            return Err(AppError::Conflict(conflict.to_string()));
        }
        rows.insert(id, row.clone());
        Ok(row.clone())
    }

    /// Replace row `id`; `clashes` is only checked against other rows.
    fn replace(
        &self,
        id: i64,
        row: &T,
        clashes: impl Fn(&T) -> bool,
        conflict: &str,
        not_found: impl FnOnce() -> AppError,
    ) -> Result<T, AppError> {
        let mut rows = self.rows.write();
        if !rows.contains_key(&id) {
            return Err(not_found());
        }
        if rows
            .iter()
            .any(|(other_id, existing)| *other_id != id && clashes(existing))
        {
            return Err(AppError::Conflict(conflict.to_string()));
        }
        rows.insert(id, row.clone());
        Ok(row.clone())
    }

    /// Replace row `id` only while `guard` holds for the stored row.
    fn replace_if(
        &self,
        id: i64,
        row: &T,
        guard: impl Fn(&T) -> bool,
        conflict: impl FnOnce(&T) -> AppError,
        not_found: impl FnOnce() -> AppError,
    ) -> Result<T, AppError> {
        let mut rows = self.rows.write();
        let current = rows.get(&id).ok_or_else(not_found)?;
        if !guard(current) {
            return Err(conflict(current));
        }
        rows.insert(id, row.clone());
        Ok(row.clone())
    }

    fn remove(&self, id: i64, not_found: impl FnOnce() -> AppError) -> Result<(), AppError> {
        self.rows.write().remove(&id).map(|_| ()).ok_or_else(not_found)
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found(self.resource, id)
    }
}

fn no_clash<T>(_: &T) -> bool {
    false
}

// =============================================================================
// Users
// =============================================================================

pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("User"),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

const DUPLICATE_EMAIL: &str = "User with this email already exists";

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.table.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.table.find(|u| u.email == email))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        self.table
            .insert(user.id, user, |u| u.email == user.email, DUPLICATE_EMAIL)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        self.table.replace(
            user.id,
            user,
            |u| u.email == user.email,
            DUPLICATE_EMAIL,
            || self.table.not_found(user.id),
        )
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.table.remove(id, || self.table.not_found(id))
    }
}

// =============================================================================
// Customer profiles
// =============================================================================

pub struct InMemoryCustomerProfileRepository {
    table: Table<CustomerProfile>,
}

impl InMemoryCustomerProfileRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("CustomerProfile"),
        }
    }
}

impl Default for InMemoryCustomerProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerProfileRepository for InMemoryCustomerProfileRepository {
    async fn find_by_id(&self, customer_id: i64) -> Result<Option<CustomerProfile>, AppError> {
        Ok(self.table.get(customer_id))
    }

    async fn find_all(&self) -> Result<Vec<CustomerProfile>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError> {
        self.table.insert(profile.customer_id, profile, no_clash, "")
    }

    async fn update(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError> {
        self.table.replace(profile.customer_id, profile, no_clash, "", || {
            self.table.not_found(profile.customer_id)
        })
    }

    async fn delete(&self, customer_id: i64) -> Result<(), AppError> {
        self.table
            .remove(customer_id, || self.table.not_found(customer_id))
    }
}

// =============================================================================
// Campaigns
// =============================================================================

pub struct InMemoryCampaignRepository {
    table: Table<Campaign>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Campaign"),
        }
    }
}

impl Default for InMemoryCampaignRepository {
    fn default() -> Self {
        Self::new()
    }
}

const DUPLICATE_CAMPAIGN: &str = "Campaign with this name already exists";

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn find_by_id(&self, campaign_id: i64) -> Result<Option<Campaign>, AppError> {
        Ok(self.table.get(campaign_id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Campaign>, AppError> {
        Ok(self.table.find(|c| c.name == name))
    }

    async fn find_by_type(&self, campaign_type: CampaignType) -> Result<Vec<Campaign>, AppError> {
        Ok(self.table.filter(|c| c.campaign_type == campaign_type))
    }

    async fn find_all(&self) -> Result<Vec<Campaign>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        self.table.insert(
            campaign.campaign_id,
            campaign,
            |c| c.name == campaign.name,
            DUPLICATE_CAMPAIGN,
        )
    }

    async fn update(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        self.table.replace(
            campaign.campaign_id,
            campaign,
            |c| c.name == campaign.name,
            DUPLICATE_CAMPAIGN,
            || self.table.not_found(campaign.campaign_id),
        )
    }

    async fn delete(&self, campaign_id: i64) -> Result<(), AppError> {
        self.table
            .remove(campaign_id, || self.table.not_found(campaign_id))
    }
}

// =============================================================================
// Notifications
// =============================================================================

pub struct InMemoryNotificationRepository {
    table: Table<Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("Notification"),
        }
    }
}

impl Default for InMemoryNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(&self, notification_id: i64) -> Result<Option<Notification>, AppError> {
        Ok(self.table.get(notification_id))
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Notification>, AppError> {
        Ok(self.table.filter(|n| n.customer_id == customer_id))
    }

    async fn find_by_status(&self, status: NotificationStatus) -> Result<Vec<Notification>, AppError> {
        Ok(self.table.filter(|n| n.status == status))
    }

    async fn find_all(&self) -> Result<Vec<Notification>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, notification: &Notification) -> Result<Notification, AppError> {
        self.table
            .insert(notification.notification_id, notification, no_clash, "")
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, AppError> {
        let id = notification.notification_id;
        self.table
            .replace(id, notification, no_clash, "", || AppError::NotificationNotFound(id))
    }

    async fn update_if_status(
        &self,
        notification: &Notification,
        expected: NotificationStatus,
    ) -> Result<Notification, AppError> {
        let id = notification.notification_id;
        self.table.replace_if(
            id,
            notification,
            |current| current.status == expected,
            |current| {
                AppError::Conflict(format!(
                    "Notification {} is already {}",
                    id, current.status
                ))
            },
            || AppError::NotificationNotFound(id),
        )
    }

    async fn delete(&self, notification_id: i64) -> Result<(), AppError> {
        self.table.remove(notification_id, || {
            AppError::NotificationNotFound(notification_id)
        })
    }
}

// =============================================================================
// Sales opportunities
// =============================================================================

pub struct InMemorySalesOpportunityRepository {
    table: Table<SalesOpportunity>,
}

impl InMemorySalesOpportunityRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("SalesOpportunity"),
        }
    }
}

impl Default for InMemorySalesOpportunityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SalesOpportunityRepository for InMemorySalesOpportunityRepository {
    async fn find_by_id(&self, opportunity_id: i64) -> Result<Option<SalesOpportunity>, AppError> {
        Ok(self.table.get(opportunity_id))
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SalesOpportunity>, AppError> {
        Ok(self.table.filter(|o| o.customer_id == customer_id))
    }

    async fn find_by_stage(&self, stage: SalesStage) -> Result<Vec<SalesOpportunity>, AppError> {
        Ok(self.table.filter(|o| o.sales_stage == stage))
    }

    async fn find_follow_ups_due(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<SalesOpportunity>, AppError> {
        let mut due = self.table.filter(|o| o.follow_up_due(before));
        due.sort_by_key(|o| o.follow_up_reminder);
        Ok(due)
    }

    async fn find_all(&self) -> Result<Vec<SalesOpportunity>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError> {
        self.table
            .insert(opportunity.opportunity_id, opportunity, no_clash, "")
    }

    async fn update(&self, opportunity: &SalesOpportunity) -> Result<SalesOpportunity, AppError> {
        self.table
            .replace(opportunity.opportunity_id, opportunity, no_clash, "", || {
                self.table.not_found(opportunity.opportunity_id)
            })
    }

    async fn delete(&self, opportunity_id: i64) -> Result<(), AppError> {
        self.table
            .remove(opportunity_id, || self.table.not_found(opportunity_id))
    }
}

// =============================================================================
// Support tickets
// =============================================================================

pub struct InMemorySupportTicketRepository {
    table: Table<SupportTicket>,
}

impl InMemorySupportTicketRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("SupportTicket"),
        }
    }
}

impl Default for InMemorySupportTicketRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupportTicketRepository for InMemorySupportTicketRepository {
    async fn find_by_id(&self, ticket_id: i64) -> Result<Option<SupportTicket>, AppError> {
        Ok(self.table.get(ticket_id))
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<SupportTicket>, AppError> {
        Ok(self.table.filter(|t| t.customer_id == customer_id))
    }

    async fn find_by_status(&self, status: TicketStatus) -> Result<Vec<SupportTicket>, AppError> {
        Ok(self.table.filter(|t| t.status == status))
    }

    async fn find_all(&self) -> Result<Vec<SupportTicket>, AppError> {
        Ok(self.table.all())
    }

    async fn create(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError> {
        self.table.insert(ticket.ticket_id, ticket, no_clash, "")
    }

    async fn update(&self, ticket: &SupportTicket) -> Result<SupportTicket, AppError> {
        self.table.replace(ticket.ticket_id, ticket, no_clash, "", || {
            self.table.not_found(ticket.ticket_id)
        })
    }

    async fn delete(&self, ticket_id: i64) -> Result<(), AppError> {
        self.table.remove(ticket_id, || self.table.not_found(ticket_id))
    }
}

// =============================================================================
// Schedule configs
// =============================================================================

pub struct InMemoryScheduleConfigRepository {
    table: Table<ScheduleConfig>,
}

impl InMemoryScheduleConfigRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("ScheduleConfig"),
        }
    }
}

impl Default for InMemoryScheduleConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

const DUPLICATE_TASK: &str = "A schedule for this task already exists";

#[async_trait]
impl ScheduleConfigRepository for InMemoryScheduleConfigRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleConfig>, AppError> {
        Ok(self.table.get(id))
    }

    async fn find_by_task_name(&self, task_name: &str) -> Result<Option<ScheduleConfig>, AppError> {
        Ok(self.table.find(|c| c.task_name == task_name))
    }

    async fn find_all(&self) -> Result<Vec<ScheduleConfig>, AppError> {
        let mut configs = self.table.all();
        configs.sort_by(|a, b| a.task_name.cmp(&b.task_name));
        Ok(configs)
    }

    async fn create(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError> {
        self.table
            .insert(config.id, config, |c| c.task_name == config.task_name, DUPLICATE_TASK)
    }

    async fn update(&self, config: &ScheduleConfig) -> Result<ScheduleConfig, AppError> {
        self.table.replace(
            config.id,
            config,
            |c| c.task_name == config.task_name,
            DUPLICATE_TASK,
            || self.table.not_found(config.id),
        )
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.table.remove(id, || self.table.not_found(id))
    }
}
