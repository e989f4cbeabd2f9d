//! Application settings and configuration structures.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Persistence configuration
    pub database: DatabaseSettings,

    /// Service registry used by inter-service clients and the gateway
    pub services: ServicesSettings,

    /// Scheduled task configuration
    pub scheduler: SchedulerSettings,

    /// Snowflake ID generator settings
    pub snowflake: SnowflakeSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Log output configuration
    pub telemetry: TelemetrySettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Which repository implementation backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Repository backend
    pub backend: StorageBackend,

    /// Database connection URL (required for the postgres backend)
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Registry of named services and their base URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesSettings {
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,

    /// service name -> base URL (e.g. "customer-service" -> "http://127.0.0.1:8080/api/v1")
    #[serde(default)]
    pub registry: HashMap<String, String>,
}

/// Scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// Start cron jobs on boot
    pub enabled: bool,
}

/// Snowflake ID generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeSettings {
    /// Machine/worker ID (0-1023)
    pub machine_id: u16,

    /// Custom epoch timestamp in milliseconds
    pub epoch: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the postgres backend is selected without a database URL.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option(
                "snowflake.machine_id",
                std::env::var("SNOWFLAKE_MACHINE_ID").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    /// Settings with defaults only, no files or environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("test")?
            .set_override("database.backend", "memory")?
            .set_override("scheduler.enabled", false)?
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("services.request_timeout_secs", 10)?
            .set_default("scheduler.enabled", true)?
            .set_default("snowflake.machine_id", 1)?
            .set_default("snowflake.epoch", 1_704_067_200_000_u64)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("telemetry.json", false)
    }

    fn validate(settings: Self) -> Result<Self, ConfigError> {
        if settings.database.backend == StorageBackend::Postgres && settings.database.url.is_empty()
        {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) is required when database.backend = \"postgres\""
                    .into(),
            ));
        }
        if settings.snowflake.machine_id > 1023 {
            return Err(ConfigError::Message(format!(
                "snowflake.machine_id must be in 0..=1023, got {}",
                settings.snowflake.machine_id
            )));
        }
        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL of this process's own API, used when a service is not in the registry.
    pub fn self_base_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" => "127.0.0.1",
            other => other,
        };
        format!("http://{}:{}/api/v1", host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_memory_backend() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.scheduler.enabled);
        assert!(settings.services.registry.is_empty());
    }

    #[test]
    fn test_self_base_url_rewrites_wildcard_host() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.self_base_url(), "http://127.0.0.1:8080/api/v1");
    }
}
