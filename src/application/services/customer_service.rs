//! Customer Service
//!
//! Customer profiles, purchase history and segmentation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::CustomerProfileDto;
use crate::domain::{CustomerProfile, CustomerProfileRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Customer service trait
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn create_customer(&self, customer: CustomerProfileDto)
        -> Result<CustomerProfileDto, AppError>;

    async fn get_customer(&self, customer_id: i64) -> Result<CustomerProfileDto, AppError>;

    async fn list_customers(&self) -> Result<Vec<CustomerProfileDto>, AppError>;

    async fn update_customer(
        &self,
        customer_id: i64,
        customer: CustomerProfileDto,
    ) -> Result<CustomerProfileDto, AppError>;

    async fn delete_customer(&self, customer_id: i64) -> Result<(), AppError>;

    /// Append one item to the purchase history.
    async fn add_purchase(&self, customer_id: i64, item: String)
        -> Result<CustomerProfileDto, AppError>;

    /// Replace the segmentation data.
    async fn segment(
        &self,
        customer_id: i64,
        segments: Vec<String>,
    ) -> Result<CustomerProfileDto, AppError>;
}

/// CustomerService implementation
pub struct CustomerServiceImpl<C>
where
    C: CustomerProfileRepository + ?Sized,
{
    customer_repo: Arc<C>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<C> CustomerServiceImpl<C>
where
    C: CustomerProfileRepository + ?Sized,
{
    pub fn new(customer_repo: Arc<C>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            customer_repo,
            id_generator,
        }
    }

    async fn find(&self, customer_id: i64) -> Result<CustomerProfile, AppError> {
        self.customer_repo
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("CustomerProfile", customer_id))
    }
}

#[async_trait]
impl<C> CustomerService for CustomerServiceImpl<C>
where
    C: CustomerProfileRepository + ?Sized + 'static,
{
    async fn create_customer(
        &self,
        customer: CustomerProfileDto,
    ) -> Result<CustomerProfileDto, AppError> {
        let mut profile = CustomerProfile::from(customer);
        if profile.customer_id == 0 {
            profile.customer_id = self.id_generator.generate();
        }

        let created = self.customer_repo.create(&profile).await?;
        tracing::info!(customer_id = created.customer_id, "Customer created");

        Ok(CustomerProfileDto::from(created))
    }

    async fn get_customer(&self, customer_id: i64) -> Result<CustomerProfileDto, AppError> {
        self.find(customer_id).await.map(CustomerProfileDto::from)
    }

    async fn list_customers(&self) -> Result<Vec<CustomerProfileDto>, AppError> {
        let customers = self.customer_repo.find_all().await?;
        Ok(customers.into_iter().map(CustomerProfileDto::from).collect())
    }

    async fn update_customer(
        &self,
        customer_id: i64,
        customer: CustomerProfileDto,
    ) -> Result<CustomerProfileDto, AppError> {
        let mut profile = CustomerProfile::from(customer);
        profile.customer_id = customer_id;

        let updated = self.customer_repo.update(&profile).await?;
        Ok(CustomerProfileDto::from(updated))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<(), AppError> {
        self.customer_repo.delete(customer_id).await
    }

    async fn add_purchase(
        &self,
        customer_id: i64,
        item: String,
    ) -> Result<CustomerProfileDto, AppError> {
        let mut profile = self.find(customer_id).await?;
        profile.purchase_history.push(item);

        let updated = self.customer_repo.update(&profile).await?;
        Ok(CustomerProfileDto::from(updated))
    }

    async fn segment(
        &self,
        customer_id: i64,
        segments: Vec<String>,
    ) -> Result<CustomerProfileDto, AppError> {
        let mut profile = self.find(customer_id).await?;
        profile.segmentation_data = segments;

        let updated = self.customer_repo.update(&profile).await?;
        Ok(CustomerProfileDto::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryCustomerProfileRepository;
    use pretty_assertions::assert_eq;

    fn service() -> CustomerServiceImpl<InMemoryCustomerProfileRepository> {
        CustomerServiceImpl::new(
            Arc::new(InMemoryCustomerProfileRepository::new()),
            Arc::new(SnowflakeGenerator::default()),
        )
    }

    fn alice() -> CustomerProfileDto {
        CustomerProfileDto {
            customer_id: None,
            name: "Alice".into(),
            email_id: "a@x.com".into(),
            phone_number: None,
            purchase_history: vec![],
            segmentation_data: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_get_returns_same_fields() {
        let service = service();
        let created = service.create_customer(alice()).await.unwrap();
        let id = created.customer_id.unwrap();

        let fetched = service.get_customer(id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.email_id, "a@x.com");
    }

    #[tokio::test]
    async fn test_add_purchase_appends() {
        let service = service();
        let id = service.create_customer(alice()).await.unwrap().customer_id.unwrap();

        service.add_purchase(id, "plan-basic".into()).await.unwrap();
        let updated = service.add_purchase(id, "plan-pro".into()).await.unwrap();

        assert_eq!(updated.purchase_history, vec!["plan-basic", "plan-pro"]);
    }

    #[tokio::test]
    async fn test_segment_replaces() {
        let service = service();
        let mut customer = alice();
        customer.segmentation_data = vec!["trial".into()];
        let id = service.create_customer(customer).await.unwrap().customer_id.unwrap();

        let updated = service
            .segment(id, vec!["enterprise".into(), "emea".into()])
            .await
            .unwrap();
        assert_eq!(updated.segmentation_data, vec!["enterprise", "emea"]);
    }

    #[tokio::test]
    async fn test_missing_customer() {
        let service = service();
        assert!(service.get_customer(9).await.unwrap_err().is_not_found());
        assert!(service.update_customer(9, alice()).await.unwrap_err().is_not_found());
        assert!(service.delete_customer(9).await.unwrap_err().is_not_found());
    }
}
