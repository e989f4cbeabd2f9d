//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, route, and status
//! - HTTP request latency histograms
//! - Inter-service call outcomes by target service
//! - Scheduled task runs by task and outcome
//! - Notification deliveries by final status

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::shared::error::AppError;

const NAMESPACE: &str = "crm";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, route, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Outbound calls to other services
pub static UPSTREAM_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("upstream_calls_total", "Inter-service calls by target and outcome")
            .namespace(NAMESPACE),
        &["service", "outcome"], // "ok", "not_found", "error_status", "transport_error", "decode_error"
    )
    .expect("Failed to create UPSTREAM_CALLS_TOTAL metric")
});

/// Scheduled task executions
pub static SCHEDULED_TASK_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scheduled_task_runs_total", "Scheduled task runs by task and outcome")
            .namespace(NAMESPACE),
        &["task", "outcome"], // "ok", "error"
    )
    .expect("Failed to create SCHEDULED_TASK_RUNS_TOTAL metric")
});

/// Notification send attempts
pub static NOTIFICATIONS_DELIVERED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("notifications_delivered_total", "Notification sends by resulting status")
            .namespace(NAMESPACE),
        &["type", "status"],
    )
    .expect("Failed to create NOTIFICATIONS_DELIVERED_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(UPSTREAM_CALLS_TOTAL.clone()))
        .expect("Failed to register UPSTREAM_CALLS_TOTAL");
    registry
        .register(Box::new(SCHEDULED_TASK_RUNS_TOTAL.clone()))
        .expect("Failed to register SCHEDULED_TASK_RUNS_TOTAL");
    registry
        .register(Box::new(NOTIFICATIONS_DELIVERED_TOTAL.clone()))
        .expect("Failed to register NOTIFICATIONS_DELIVERED_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, AppError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("Metrics are not valid UTF-8: {}", e)))
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record one inter-service call
pub fn record_upstream_call(service: &str, outcome: &str) {
    UPSTREAM_CALLS_TOTAL
        .with_label_values(&[service, outcome])
        .inc();
}

/// Helper to record one scheduled task run
pub fn record_task_run(task: &str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    SCHEDULED_TASK_RUNS_TOTAL
        .with_label_values(&[task, outcome])
        .inc();
}

/// Helper to record a notification leaving PENDING
pub fn record_notification_delivery(notification_type: &str, status: &str) {
    NOTIFICATIONS_DELIVERED_TOTAL
        .with_label_values(&[notification_type, status])
        .inc();
}
