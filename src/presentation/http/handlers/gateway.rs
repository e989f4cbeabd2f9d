//! Service Gateway
//!
//! `ANY /gateway/{service}/{*path}` forwards the request to the named
//! service's registered base URL, preserving method, query string, body
//! and status. Hop-by-hop headers are dropped in both directions.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::Response,
};

use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

const HOP_BY_HOP: [HeaderName; 10] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
    header::CONTENT_LENGTH,
];

fn forwardable(name: &HeaderName) -> bool {
    !HOP_BY_HOP.contains(name)
}

/// Headers safe to pass through: the fixed hop-by-hop set plus any
/// names the sender listed in its `Connection` header are removed.
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    headers
        .iter()
        .filter(|(name, _)| forwardable(name) && !listed.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Target URL for `path` under `base`, keeping the original query.
fn target_url(base: &str, path: &str, uri: &Uri) -> String {
    let mut url = format!("{}/{}", base, path.trim_start_matches('/'));
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    url
}

pub async fn forward(
    State(state): State<AppState>,
    Path((service, path)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let base = state
        .registry
        .resolve(&service)
        .ok_or_else(|| AppError::not_found("Service", &service))?;
    let url = target_url(base, &path, &uri);
    tracing::debug!(%service, %method, %url, "Forwarding gateway request");

    let mut request = state.http_client.request(method, &url).body(body);
    for (name, value) in end_to_end(&headers).iter() {
        request = request.header(name, value);
    }

    let upstream = request.send().await.map_err(|e| {
        metrics::record_upstream_call(&service, "transport_error");
        AppError::Upstream(format!("{} is unreachable: {}", service, e))
    })?;
    metrics::record_upstream_call(&service, "forwarded");

    let mut response = Response::builder().status(upstream.status());
    for (name, value) in end_to_end(upstream.headers()).iter() {
        response = response.header(name, value);
    }

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to read {} response: {}", service, e)))?;

    response
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build gateway response: {}", e)))
}
