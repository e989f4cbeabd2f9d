//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod campaign;
pub mod customer;
pub mod gateway;
pub mod health;
pub mod notification;
pub mod report;
pub mod sales;
pub mod schedule;
pub mod support;
pub mod user;
