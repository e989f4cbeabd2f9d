//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{any, get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{create_cors_layer, create_trace_layer, track_requests};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    Router::new()
        .nest("/api/v1", api_routes())
        // Forward to a registered service by name
        .route("/gateway/{service}/{*path}", any(handlers::gateway::forward))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(create_trace_layer())
        .layer(middleware::from_fn(track_requests))
        .layer(cors)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let metrics = metrics::gather_metrics()?;
    Ok((
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    ))
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/customers", customer_routes())
        .nest("/campaigns", campaign_routes())
        .nest("/notifications", notification_routes())
        .nest("/opportunities", opportunity_routes())
        .nest("/tickets", ticket_routes())
        .nest("/schedules", schedule_routes())
        .nest("/reports", report_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::user::create_user).get(handlers::user::list_users),
        )
        .route("/login", post(handlers::user::login))
        .route("/by-email", get(handlers::user::get_user_by_email))
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::customer::create_customer).get(handlers::customer::list_customers),
        )
        .route(
            "/{id}",
            get(handlers::customer::get_customer)
                .put(handlers::customer::update_customer)
                .delete(handlers::customer::delete_customer),
        )
        .route("/{id}/purchases", post(handlers::customer::add_purchase))
        .route("/{id}/segments", put(handlers::customer::update_segments))
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::campaign::create_campaign).get(handlers::campaign::list_campaigns),
        )
        .route(
            "/{id}",
            get(handlers::campaign::get_campaign)
                .put(handlers::campaign::update_campaign)
                .delete(handlers::campaign::delete_campaign),
        )
        .route(
            "/{id}/interactions",
            post(handlers::campaign::record_interaction),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::notification::create_notification)
                .get(handlers::notification::list_notifications),
        )
        .route("/dispatch", post(handlers::notification::dispatch_pending))
        .route(
            "/{id}",
            get(handlers::notification::get_notification)
                .put(handlers::notification::update_notification)
                .delete(handlers::notification::delete_notification),
        )
        .route("/{id}/send", post(handlers::notification::send_notification))
}

fn opportunity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::sales::create_opportunity).get(handlers::sales::list_opportunities),
        )
        .route(
            "/{id}",
            get(handlers::sales::get_opportunity)
                .put(handlers::sales::update_opportunity)
                .delete(handlers::sales::delete_opportunity),
        )
        .route("/{id}/stage", put(handlers::sales::update_stage))
        .route(
            "/{id}/customer",
            get(handlers::sales::get_opportunity_customer),
        )
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::support::create_ticket).get(handlers::support::list_tickets),
        )
        .route(
            "/{id}",
            get(handlers::support::get_ticket)
                .put(handlers::support::update_ticket)
                .delete(handlers::support::delete_ticket),
        )
        .route("/{id}/status", put(handlers::support::update_ticket_status))
}

fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::schedule::create_schedule).get(handlers::schedule::list_schedules),
        )
        .route(
            "/by-task/{task_name}",
            get(handlers::schedule::get_schedule_by_task),
        )
        .route(
            "/{id}",
            get(handlers::schedule::get_schedule)
                .put(handlers::schedule::update_schedule)
                .delete(handlers::schedule::delete_schedule),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(handlers::report::sales_report))
        .route("/notifications", get(handlers::report::notification_report))
        .route("/support", get(handlers::report::support_report))
        .route("/campaigns", get(handlers::report::campaign_report))
}
