//! Infrastructure Layer
//!
//! Contains implementations for external concerns including:
//! - Repositories (PostgreSQL and in-memory)
//! - Inter-service HTTP clients and the service registry
//! - Cron scheduler for background tasks
//! - Prometheus metrics

pub mod clients;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod scheduler;
