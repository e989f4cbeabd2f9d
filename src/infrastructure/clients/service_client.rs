//! Typed JSON calls against a named service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::registry::ServiceRegistry;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Build the shared outbound HTTP client.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP access to one service, resolved through the registry on each call.
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    registry: Arc<ServiceRegistry>,
    service: &'static str,
}

impl ServiceClient {
    pub fn new(http: reqwest::Client, registry: Arc<ServiceRegistry>, service: &'static str) -> Self {
        Self {
            http,
            registry,
            service,
        }
    }

    fn url(&self, path: &str) -> Result<String, AppError> {
        let base = self.registry.resolve(self.service).ok_or_else(|| {
            AppError::Upstream(format!("Service {} is not registered", self.service))
        })?;
        Ok(format!("{}{}", base, path))
    }

    /// GET `path`; a 404 yields `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        if response.status() == StatusCode::NOT_FOUND {
            metrics::record_upstream_call(self.service, "not_found");
            return Ok(None);
        }
        self.decode(response).await.map(Some)
    }

    /// GET `path`; any non-2xx is an error.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        self.decode(response).await
    }

    /// POST `body` as JSON to `path`.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        self.decode(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.url(path)?;
        tracing::debug!(service = self.service, %method, %url, "Calling remote service");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            metrics::record_upstream_call(self.service, "transport_error");
            AppError::Upstream(format!("{} request failed: {}", self.service, e))
        })
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            metrics::record_upstream_call(self.service, "error_status");
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "{} returned {}: {}",
                self.service, status, error_text
            )));
        }

        let data = response.json::<T>().await.map_err(|e| {
            metrics::record_upstream_call(self.service, "decode_error");
            AppError::Upstream(format!("Failed to parse {} response: {}", self.service, e))
        })?;
        metrics::record_upstream_call(self.service, "ok");
        Ok(data)
    }
}
