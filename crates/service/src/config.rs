//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLIENTELE_DATABASE_URL` - `PostgreSQL` connection string (not
//!   required when `CLIENTELE_STORE_BACKEND=memory`)
//! - `CLIENTELE_CUSTOMER_BUCKET` - S3 bucket for customer profile images
//!
//! ## Optional
//! - `CLIENTELE_STORE_BACKEND` - `postgres` (default), `orm`, or `memory`
//!
//! AWS credentials and region for the blob store are resolved by the AWS
//! SDK's own environment chain.

use std::env;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which persistence backend to wire behind the store contract.
///
/// Replaces the dependency-injection qualifier of the surrounding server:
/// the backend is picked once, at startup, from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Direct parameterized statements against `PostgreSQL`.
    #[default]
    Postgres,
    /// Row-mapped query types against `PostgreSQL`.
    Orm,
    /// In-memory store, for prototyping and tests.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "orm" => Ok(Self::Orm),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend {other:?} (expected postgres, orm, or memory)"
            )),
        }
    }
}

/// Customer service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL (contains password). `None` only when
    /// the memory backend is selected.
    pub database_url: Option<SecretString>,
    /// Persistence backend selection.
    pub store_backend: StoreBackend,
    /// S3 bucket holding customer profile images.
    pub customer_bucket: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is
    /// absent, or `ConfigError::InvalidEnvVar` if a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = match env::var("CLIENTELE_STORE_BACKEND") {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CLIENTELE_STORE_BACKEND".into(), e))?,
            Err(_) => StoreBackend::default(),
        };

        let database_url = env::var("CLIENTELE_DATABASE_URL").ok().map(SecretString::from);
        if database_url.is_none() && store_backend != StoreBackend::Memory {
            return Err(ConfigError::MissingEnvVar("CLIENTELE_DATABASE_URL".into()));
        }

        let customer_bucket = env::var("CLIENTELE_CUSTOMER_BUCKET")
            .map_err(|_| ConfigError::MissingEnvVar("CLIENTELE_CUSTOMER_BUCKET".into()))?;

        Ok(Self {
            database_url,
            store_backend,
            customer_bucket,
        })
    }
}
