//! # CRM Platform Library
//!
//! Customer relationship management over REST:
//! - Users, customer profiles, marketing campaigns
//! - Notifications with scheduled dispatch
//! - Sales pipeline with follow-up reminders
//! - Support tickets and analytics reports
//! - A gateway forwarding `/gateway/{service}/...` to registered services
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Repositories, inter-service clients, scheduler, metrics
//! - **Presentation Layer**: HTTP handlers, routes and middleware
//!
//! Modules call each other through HTTP clients resolved by service name,
//! so a module can be moved to its own deployment by changing the
//! `services.registry` configuration.
//!
//! ## Module Structure
//!
//! ```text
//! crm_platform/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Repositories, clients, scheduler, metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
