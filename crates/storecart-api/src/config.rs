//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVENTORY_API_URL` - Base URL of the inventory service
//!
//! ## Optional
//! - `INVENTORY_TIMEOUT_SECS` - Per-request timeout for the inventory service (default: 10)
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string; selects the database cart store
//! - `CART_STORAGE_DIR` - Directory for the file cart store (default: ./data)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the cart record is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartStorageConfig {
    /// One JSON file per slot in this directory.
    File(PathBuf),
    /// A `cart_slots` table in this database.
    Postgres(String),
}

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Inventory service base URL.
    pub inventory_api_url: String,
    /// Per-request inventory timeout.
    pub inventory_timeout: Duration,
    /// Cart record storage.
    pub storage: CartStorageConfig,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let inventory_api_url = get_required(&lookup, "INVENTORY_API_URL")?;
        let timeout_secs: u64 = parse_or_default(&lookup, "INVENTORY_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "INVENTORY_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let storage = match get_optional(&lookup, "CART_DATABASE_URL") {
            Some(url) => CartStorageConfig::Postgres(url),
            None => CartStorageConfig::File(PathBuf::from(
                get_optional(&lookup, "CART_STORAGE_DIR").unwrap_or_else(|| "./data".to_string()),
            )),
        };

        let host = parse_or_default(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or_default(&lookup, "PORT", 3000)?;

        Ok(Self {
            inventory_api_url,
            inventory_timeout: Duration::from_secs(timeout_secs),
            storage,
            host,
            port,
        })
    }

    /// Address the server listens on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Returns the value of `name`, treating blank values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, ConfigError> {
    get_optional(lookup, name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional(lookup, name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        None => Ok(default),
    }
}
