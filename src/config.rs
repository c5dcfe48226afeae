//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default bind host.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
const DEFAULT_PORT: u16 = 8080;
/// Default database pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default seconds between overdue sweeps.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
/// Default tracing filter.
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value '{value}' for {key}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
    /// The sweep interval is zero.
    #[error("TODO_SWEEP_INTERVAL_SECS must be greater than zero")]
    ZeroSweepInterval,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL; `None` selects the in-memory store.
    pub url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Overdue sweep trigger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Whether the recurring sweep runs at all.
    pub enabled: bool,
    /// Time between sweeps.
    pub interval: Duration,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage settings.
    pub database: DatabaseConfig,
    /// Sweep trigger settings.
    pub sweep: SweepConfig,
    /// Tracing filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value or
    /// the sweep interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let interval_secs = parse_or(&lookup, "TODO_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(ConfigError::ZeroSweepInterval);
        }

        Ok(Self {
            server: ServerConfig {
                host: lookup("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
                port: parse_or(&lookup, "TODO_PORT", DEFAULT_PORT)?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            sweep: SweepConfig {
                enabled: parse_or(&lookup, "TODO_SWEEP_ENABLED", true)?,
                interval: Duration::from_secs(interval_secs),
            },
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
