//! API configuration from environment variables (and `.env`)

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_HOST: &str = "MCPCATALOG_HOST";
pub const ENV_PORT: &str = "MCPCATALOG_PORT";
pub const ENV_DB: &str = "MCPCATALOG_DB";
pub const ENV_LOG_DIR: &str = "MCPCATALOG_LOG_DIR";

pub const DEFAULT_PORT: u16 = 3200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got '{value}'")]
    InvalidPort { var: &'static str, value: String },

    #[error("'{0}' is not a valid listen address")]
    InvalidAddress(String),

    #[error("no database path configured and no platform data directory available")]
    NoDatabasePath,
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub database_path: Option<PathBuf>,
    /// Directory for daily-rotated log files; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            database_path: mcpcatalog_storage::default_database_path(),
            log_dir: None,
        }
    }
}

impl ApiConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: ENV_PORT,
                value: port,
            })?;
        }
        if let Some(db) = lookup(ENV_DB).filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(db));
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|p| !p.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    pub fn database_path(&self) -> Result<&PathBuf, ConfigError> {
        self.database_path.as_ref().ok_or(ConfigError::NoDatabasePath)
    }
}
