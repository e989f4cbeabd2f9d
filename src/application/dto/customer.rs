//! Customer profile DTOs and mapping.
//!
//! The DTO is flat; the entity nests email/phone in [`ContactInfo`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{ContactInfo, CustomerProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfileDto {
    #[serde(rename = "customerID")]
    pub customer_id: Option<i64>,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email_id: String,

    pub phone_number: Option<String>,

    #[serde(default)]
    pub purchase_history: Vec<String>,

    #[serde(default)]
    pub segmentation_data: Vec<String>,
}

impl From<CustomerProfile> for CustomerProfileDto {
    fn from(profile: CustomerProfile) -> Self {
        Self {
            customer_id: Some(profile.customer_id),
            name: profile.name,
            email_id: profile.contact_info.email,
            phone_number: profile.contact_info.phone,
            purchase_history: profile.purchase_history,
            segmentation_data: profile.segmentation_data,
        }
    }
}

impl From<CustomerProfileDto> for CustomerProfile {
    fn from(dto: CustomerProfileDto) -> Self {
        Self {
            customer_id: dto.customer_id.unwrap_or_default(),
            name: dto.name,
            contact_info: ContactInfo {
                email: dto.email_id,
                phone: dto.phone_number,
            },
            purchase_history: dto.purchase_history,
            segmentation_data: dto.segmentation_data,
        }
    }
}

/// Append one item to the purchase history
#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "Item must not be empty"))]
    pub item: String,
}

/// Replace segmentation data
#[derive(Debug, Deserialize)]
pub struct SegmentsRequest {
    pub segments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_fields() {
        let profile = CustomerProfile {
            customer_id: 9001,
            name: "Alice".into(),
            contact_info: ContactInfo::new("a@x.com", Some("+1 555 0100".into())),
            purchase_history: vec!["starter-plan".into(), "addon-seats".into()],
            segmentation_data: vec!["smb".into()],
        };
        assert_eq!(
            CustomerProfile::from(CustomerProfileDto::from(profile.clone())),
            profile
        );
    }

    #[test]
    fn test_json_field_names() {
        let dto: CustomerProfileDto =
            serde_json::from_str(r#"{"customerID":null,"name":"Alice","emailId":"a@x.com"}"#)
                .unwrap();
        assert_eq!(dto.customer_id, None);
        assert!(dto.purchase_history.is_empty());

        let json = serde_json::to_value(CustomerProfileDto {
            customer_id: Some(5),
            ..dto
        })
        .unwrap();
        assert_eq!(json["customerID"], 5);
        assert_eq!(json["emailId"], "a@x.com");
        assert!(json["phoneNumber"].is_null());
    }
}
