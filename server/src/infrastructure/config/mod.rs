//! Configuration management for the task service.
//!
//! Settings come from defaults overlaid with `TASKLIST__*` environment
//! variables (`__` separates sections). The bare `PORT` and `DATABASE_URL`
//! variables are honoured as well and take precedence.
//!
//! # Example
//!
//! ```no_run
//! use tasklist_server::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! println!("listening on port {}", settings.server.port);
//! ```

pub mod database;
pub mod server;
pub mod telemetry;

pub use database::DatabaseSettings;
pub use server::ServerSettings;
pub use telemetry::TelemetrySettings;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level configuration for the task service.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Server settings.
    pub server: ServerSettings,
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
    /// Database settings.
    pub database: DatabaseSettings,
}

impl Settings {
    /// Creates a new settings instance from the process environment and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds settings from an explicit set of environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = vars.get("PORT").cloned();
        let database_url = vars.get("DATABASE_URL").cloned();

        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://tasklist.db")?
            .set_default("database.max_connections", 5)?
            .set_default("telemetry.service_name", "tasklist-server")?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.sampling_ratio", 1.0)?
            .add_source(
                Environment::with_prefix("TASKLIST")
                    .separator("__")
                    .source(Some(vars.into_iter().collect())),
            )
            .set_override_option("server.port", port)?
            .set_override_option("database.url", database_url)?
            .build()?;

        s.try_deserialize()
    }
}

/// Helper for strong typing addresses
pub struct BindAddress(pub String, pub u16);

impl BindAddress {
    /// Converts the bind address to a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP address string cannot be parsed.
    pub fn to_socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let ip = self
            .0
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IP address '{}': {e}", self.0))?;
        Ok(std::net::SocketAddr::new(ip, self.1))
    }
}

impl From<&ServerSettings> for BindAddress {
    fn from(settings: &ServerSettings) -> Self {
        Self(settings.host.clone(), settings.port)
    }
}
