//! Customer Profile Repository Implementation
//!
//! PostgreSQL implementation of the CustomerProfileRepository trait.
//! `ContactInfo` is flattened into `contact_email` / `contact_phone`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{ContactInfo, CustomerProfile, CustomerProfileRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CustomerProfileRow {
    customer_id: i64,
    name: String,
    contact_email: String,
    contact_phone: Option<String>,
    purchase_history: Vec<String>,
    segmentation_data: Vec<String>,
}

impl From<CustomerProfileRow> for CustomerProfile {
    fn from(row: CustomerProfileRow) -> Self {
        CustomerProfile {
            customer_id: row.customer_id,
            name: row.name,
            contact_info: ContactInfo {
                email: row.contact_email,
                phone: row.contact_phone,
            },
            purchase_history: row.purchase_history,
            segmentation_data: row.segmentation_data,
        }
    }
}

const CUSTOMER_COLUMNS: &str =
    "customer_id, name, contact_email, contact_phone, purchase_history, segmentation_data";

/// PostgreSQL customer profile repository.
#[derive(Clone)]
pub struct PgCustomerProfileRepository {
    pool: PgPool,
}

impl PgCustomerProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerProfileRepository for PgCustomerProfileRepository {
    async fn find_by_id(&self, customer_id: i64) -> Result<Option<CustomerProfile>, AppError> {
        let row = sqlx::query_as::<_, CustomerProfileRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer_profiles WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerProfile::from))
    }

    async fn find_all(&self) -> Result<Vec<CustomerProfile>, AppError> {
        let rows = sqlx::query_as::<_, CustomerProfileRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer_profiles ORDER BY customer_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerProfile::from).collect())
    }

    async fn create(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError> {
        let row = sqlx::query_as::<_, CustomerProfileRow>(&format!(
            r#"
            INSERT INTO customer_profiles
                (customer_id, name, contact_email, contact_phone, purchase_history, segmentation_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(profile.customer_id)
        .bind(&profile.name)
        .bind(&profile.contact_info.email)
        .bind(&profile.contact_info.phone)
        .bind(&profile.purchase_history)
        .bind(&profile.segmentation_data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            crate::shared::error::map_unique_violation(e, "Customer with this id already exists")
        })?;

        Ok(row.into())
    }

    async fn update(&self, profile: &CustomerProfile) -> Result<CustomerProfile, AppError> {
        let row = sqlx::query_as::<_, CustomerProfileRow>(&format!(
            r#"
            UPDATE customer_profiles
            SET name = $2, contact_email = $3, contact_phone = $4,
                purchase_history = $5, segmentation_data = $6
            WHERE customer_id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(profile.customer_id)
        .bind(&profile.name)
        .bind(&profile.contact_info.email)
        .bind(&profile.contact_info.phone)
        .bind(&profile.purchase_history)
        .bind(&profile.segmentation_data)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("CustomerProfile", profile.customer_id))?;

        Ok(row.into())
    }

    async fn delete(&self, customer_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customer_profiles WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("CustomerProfile", customer_id));
        }

        Ok(())
    }
}
