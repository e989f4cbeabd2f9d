//! Data Transfer Objects
//!
//! DTOs for API request/response serialization, and the mapping between
//! each DTO and its entity (`From` in both directions, field by field).

pub mod campaign;
pub mod customer;
pub mod notification;
pub mod report;
pub mod sales;
pub mod schedule;
pub mod support;
pub mod user;

pub use campaign::{CampaignDto, CampaignQuery, InteractionRequest};
pub use customer::{CustomerProfileDto, PurchaseRequest, SegmentsRequest};
pub use notification::{DispatchSummary, NotificationDto, NotificationQuery};
pub use report::{
    CampaignReport, CampaignTypeSummary, NotificationReport, SalesPipelineReport, StageSummary,
    StatusCount, SupportReport,
};
pub use sales::{OpportunityQuery, SalesOpportunityDto, StageUpdateRequest};
pub use schedule::ScheduleConfigDto;
pub use support::{SupportTicketDto, TicketQuery, TicketStatusRequest};
pub use user::{EmailQuery, LoginRequest, UserDto};
