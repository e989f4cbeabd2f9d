//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **UserService**: Back-office accounts and password login
//! - **CustomerService**: Customer profiles, purchases and segments
//! - **CampaignService**: Marketing campaigns and interaction counts
//! - **NotificationService**: Notification storage and delivery
//! - **SalesService**: Sales pipeline and follow-up reminders
//! - **SupportService**: Support tickets
//! - **ScheduleService**: Cron configuration of background tasks
//! - **ReportService**: Analytics reports

pub mod campaign_service;
pub mod customer_service;
pub mod notification_service;
pub mod report_service;
pub mod sales_service;
pub mod schedule_service;
pub mod support_service;
pub mod user_service;

pub use campaign_service::{CampaignService, CampaignServiceImpl};
pub use customer_service::{CustomerService, CustomerServiceImpl};
pub use notification_service::{NotificationService, NotificationServiceImpl};
pub use report_service::{LoggedReportService, ReportService, ReportServiceImpl};
pub use sales_service::{SalesService, SalesServiceImpl};
pub use schedule_service::{validate_cron, ScheduleService, ScheduleServiceImpl};
pub use support_service::{SupportService, SupportServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
