//! Inter-Service Clients
//!
//! HTTP clients through which one CRM module calls another's REST API,
//! resolving the target by service name in the [`ServiceRegistry`].
//! Failures (transport, non-2xx, undecodable JSON) surface as
//! `AppError::Upstream`; nothing is retried.

mod customer_client;
mod notification_client;
mod registry;
mod service_client;

pub use customer_client::{CustomerClient, HttpCustomerClient};
pub use notification_client::{HttpNotificationClient, NotificationClient};
pub use registry::{
    ServiceRegistry, ANALYTICS_SERVICE, CUSTOMER_SERVICE, LOCAL_SERVICES, MARKETING_SERVICE,
    NOTIFICATION_SERVICE, SALES_SERVICE, SUPPORT_SERVICE, USER_SERVICE,
};
pub use service_client::{build_http_client, ServiceClient};

#[cfg(test)]
pub use customer_client::MockCustomerClient;
#[cfg(test)]
pub use notification_client::MockNotificationClient;
