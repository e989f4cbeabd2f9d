//! Customer service client.

use async_trait::async_trait;

use super::service_client::ServiceClient;
use crate::application::dto::CustomerProfileDto;
use crate::shared::error::AppError;

/// Remote view of the customer module's REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerClient: Send + Sync {
    /// `GET /customers/{id}`; `None` when the customer does not exist.
    async fn get_customer(&self, customer_id: i64) -> Result<Option<CustomerProfileDto>, AppError>;

    /// `GET /customers`
    async fn list_customers(&self) -> Result<Vec<CustomerProfileDto>, AppError>;
}

pub struct HttpCustomerClient {
    client: ServiceClient,
}

impl HttpCustomerClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomerClient for HttpCustomerClient {
    async fn get_customer(&self, customer_id: i64) -> Result<Option<CustomerProfileDto>, AppError> {
        self.client
            .get_optional(&format!("/customers/{}", customer_id))
            .await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerProfileDto>, AppError> {
        self.client.get("/customers").await
    }
}
