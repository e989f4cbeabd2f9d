//! # CRM Platform
//!
//! Customer relationship management server.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Repositories (PostgreSQL or in-memory)
//! - Background task scheduler
//! - HTTP server

use anyhow::Result;
use tracing::info;

use crm_platform::config::Settings;
use crm_platform::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment and config files
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    crm_platform::telemetry::init_tracing(&settings.telemetry);

    info!("Starting CRM Platform...");
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.database.backend,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
