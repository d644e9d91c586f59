//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEMENTINE_TABLE` - DynamoDB table name
//!
//! ## Optional
//! - `CLEMENTINE_HOST` - Bind address (default: 127.0.0.1)
//! - `CLEMENTINE_PORT` - Listen port (default: 3001)
//! - `DYNAMO_ENDPOINT_URL` - Endpoint override for DynamoDB Local
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. production)
//!
//! AWS credentials and region come from the standard SDK environment
//! (`AWS_REGION`, `AWS_ACCESS_KEY_ID`, instance roles, ...), resolved by
//! `aws-config` - they are not duplicated here.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// DynamoDB table name
    pub table_name: String,
    /// Endpoint override for DynamoDB Local
    pub dynamo_endpoint: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CLEMENTINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLEMENTINE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CLEMENTINE_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLEMENTINE_PORT".to_string(), e.to_string()))?;
        let table_name = get_required_env("CLEMENTINE_TABLE")?;
        let dynamo_endpoint = get_optional_env("DYNAMO_ENDPOINT_URL");
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            table_name,
            dynamo_endpoint,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
