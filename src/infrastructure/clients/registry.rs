//! Service Registry
//!
//! Static directory of service name -> base URL. Names missing from
//! configuration fall back to this process's own API when they are CRM
//! services hosted here.

use std::collections::HashMap;

use crate::config::Settings;

pub const USER_SERVICE: &str = "user-service";
pub const CUSTOMER_SERVICE: &str = "customer-service";
pub const SALES_SERVICE: &str = "sales-service";
pub const MARKETING_SERVICE: &str = "marketing-service";
pub const SUPPORT_SERVICE: &str = "support-service";
pub const NOTIFICATION_SERVICE: &str = "notification-service";
pub const ANALYTICS_SERVICE: &str = "analytics-service";

/// Services implemented by this binary.
pub const LOCAL_SERVICES: &[&str] = &[
    USER_SERVICE,
    CUSTOMER_SERVICE,
    SALES_SERVICE,
    MARKETING_SERVICE,
    SUPPORT_SERVICE,
    NOTIFICATION_SERVICE,
    ANALYTICS_SERVICE,
];

#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: HashMap<String, String>,
    local_base_url: String,
}

impl ServiceRegistry {
    pub fn new(services: HashMap<String, String>, local_base_url: impl Into<String>) -> Self {
        let services = services
            .into_iter()
            .map(|(name, url)| (name, url.trim_end_matches('/').to_string()))
            .collect();
        Self {
            services,
            local_base_url: local_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.services.registry.clone(), settings.self_base_url())
    }

    /// Base URL for `name`, without a trailing slash.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.services.get(name).map(String::as_str).or_else(|| {
            LOCAL_SERVICES
                .contains(&name)
                .then_some(self.local_base_url.as_str())
        })
    }

    /// Every resolvable service name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .services
            .keys()
            .cloned()
            .chain(LOCAL_SERVICES.iter().map(|s| s.to_string()))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
