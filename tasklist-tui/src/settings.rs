use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Configuration error: {0} (set TASKLIST__SERVER_URL to the task server's URL)")]
    Config(#[from] ConfigError),
    #[error("Invalid server URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    server_url: String,
    log_dir: Option<PathBuf>,
}

/// Client configuration. `server_url` has no default.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API base URL without a trailing slash.
    pub server_url: String,
    pub log_dir: PathBuf,
}

impl ClientSettings {
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, SettingsError> {
        let raw: RawSettings = Config::builder()
            .add_source(
                Environment::with_prefix("TASKLIST")
                    .separator("__")
                    .source(Some(vars.into_iter().collect())),
            )
            .build()?
            .try_deserialize()?;

        let server_url = raw.server_url.trim().trim_end_matches('/').to_string();
        Url::parse(&server_url).map_err(|source| SettingsError::InvalidUrl {
            url: server_url.clone(),
            source,
        })?;

        Ok(Self {
            server_url,
            log_dir: raw.log_dir.unwrap_or_else(std::env::temp_dir),
        })
    }
}
