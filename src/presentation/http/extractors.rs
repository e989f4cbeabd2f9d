//! Custom Extractors
//!
//! Request parsing that fails with [`AppError`] JSON bodies instead of
//! axum's plain-text rejections.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::shared::error::AppError;

/// JSON request body. Malformed JSON, unknown enum literals and missing
/// fields are reported as `400 Bad Request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// Parse a numeric path id.
pub fn parse_id(raw: &str, resource: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", resource)))
}
