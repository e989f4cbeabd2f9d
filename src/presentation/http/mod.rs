//! HTTP Interface
//!
//! REST routes under `/api/v1`, health and metrics endpoints, and the
//! service gateway.

pub mod extractors;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
