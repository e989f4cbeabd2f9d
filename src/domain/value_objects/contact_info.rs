//! Customer contact details embedded in a profile.

use serde::{Deserialize, Serialize};

use crate::domain::NotificationType;

/// How to reach a customer.
///
/// Stored inline on `customer_profiles` as `contact_email` / `contact_phone`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn new(email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            email: email.into(),
            phone,
        }
    }

    /// Best address for outbound delivery: email first, then phone.
    pub fn preferred_channel(&self) -> Option<&str> {
        if !self.email.is_empty() {
            Some(&self.email)
        } else {
            self.phone()
        }
    }

    /// Address for a delivery channel: phone for SMS and push, email
    /// otherwise, each falling back to the other when missing.
    pub fn address_for(&self, channel: NotificationType) -> Option<&str> {
        match channel {
            NotificationType::Sms | NotificationType::Push => {
                self.phone().or_else(|| self.preferred_channel())
            }
            NotificationType::Email | NotificationType::InApp => self.preferred_channel(),
        }
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }
}
