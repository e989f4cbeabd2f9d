//! Customer profile entity and repository trait.
//!
//! Maps to the `customer_profiles` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContactInfo;
use crate::shared::error::AppError;

/// A customer known to the CRM.
///
/// Maps to the `customer_profiles` table:
/// - customer_id: BIGINT PRIMARY KEY
/// - name: VARCHAR(200) NOT NULL
/// - contact_email: VARCHAR(255) NOT NULL
/// - contact_phone: VARCHAR(50) NULL
/// - purchase_history: TEXT[] NOT NULL
/// - segmentation_data: TEXT[] NOT NULL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: i64,
    pub name: String,
    pub contact_info: ContactInfo,
    pub purchase_history: Vec<String>,
    pub segmentation_data: Vec<String>,
}

/// Repository trait for CustomerProfile data access operations.
#[async_trait]
pub trait CustomerProfileRepository: Send + Sync {
    async fn find_by_id(&self, customer_id: i64) -> Result<Option<CustomerProfile>, AppError>;

    async fn find_all(&self) -> Result<Vec<CustomerProfile>, AppError>;

    async fn create(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError>;

    async fn update(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError>;

    async fn delete(&self, customer_id: i64) -> Result<(), AppError>;
}
