//! Database configuration for the task service.
//!
//! This module defines storage connection settings.

use secrecy::SecretString;
use serde::Deserialize;

/// Database connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Database connection URL.
    pub url: SecretString,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}
