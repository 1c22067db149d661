//! Persistence gateway for customer records.
//!
//! The [`CustomerStore`] trait is the uniform storage contract. Three
//! backends implement it and behave identically from the caller's
//! perspective:
//!
//! - [`StatementStore`] - direct parameterized statements
//! - [`OrmStore`] - row-mapped query types with a declarative page size
//! - [`MemoryStore`] - an owned in-memory collection, used where no
//!   durable store is configured and in tests
//!
//! # Migrations
//!
//! Migrations are stored in `crates/service/migrations/` and applied via
//! [`run_migrations`]. The schema carries a UNIQUE constraint on
//! `customer.email` as a storage-level backstop for the service's
//! check-then-act uniqueness check; a violation surfaces as
//! [`RepositoryError::Conflict`].

pub mod memory;
pub mod orm;
pub mod statement;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use clientele_core::{CustomerId, Email};

use crate::config::{AppConfig, ConfigError, StoreBackend};
use crate::models::{Customer, NewCustomer};

pub use memory::MemoryStore;
pub use orm::OrmStore;
pub use statement::StatementStore;

/// Fixed page size bounding `list_all` scans.
pub const PAGE_SIZE: i64 = 100;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// The uniform storage contract for customer records.
///
/// Row-to-domain mapping in every backend is a pure, stateless transform;
/// business rules (uniqueness pre-checks, diff-merge) live in the service.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// List customers, bounded to [`PAGE_SIZE`] records. Ordering is
    /// backend-defined but stable within a backend.
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Get a customer by ID.
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Get a customer by email address.
    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError>;

    /// Insert a new customer, assigning its ID. Returns the stored record.
    ///
    /// A storage-level unique-email violation surfaces as
    /// [`RepositoryError::Conflict`].
    async fn insert(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;

    /// Overwrite a customer's attribute columns (full-row semantics; the
    /// caller merges first). The profile-image pointer has its own
    /// operation and is left untouched.
    ///
    /// Returns [`RepositoryError::NotFound`] when no row matches.
    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError>;

    /// Whether a customer with this email exists.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Whether a customer with this ID exists.
    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError>;

    /// Delete a customer by ID. Succeeds silently when absent.
    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError>;

    /// Point-update of the profile-image pointer, the only single-column
    /// mutation in the contract.
    ///
    /// Returns [`RepositoryError::NotFound`] when no row matches.
    async fn update_profile_image_id(
        &self,
        image_id: &str,
        id: CustomerId,
    ) -> Result<(), RepositoryError>;
}

/// Declarative page-size wrapper for "fetch first N rows" queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    size: i64,
}

impl Page {
    /// Create a page of the given size.
    #[must_use]
    pub const fn of(size: i64) -> Self {
        Self { size }
    }

    /// Render the SQL fetch clause for this page.
    #[must_use]
    pub fn fetch_clause(&self) -> String {
        format!("FETCH FIRST {} ROWS ONLY", self.size)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply pending migrations from `crates/service/migrations/`.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Errors that can occur while wiring a store backend.
#[derive(Debug, Error)]
pub enum StoreInitError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The database connection could not be established.
    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Wire the configured persistence backend behind the store contract.
///
/// This is the dependency-injection point: backends are interchangeable
/// and selected once, at startup.
///
/// # Errors
///
/// Returns `StoreInitError::Config` if a SQL backend is selected without
/// a database URL, or `StoreInitError::Connect` if the pool cannot be
/// built.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn CustomerStore>, StoreInitError> {
    if config.store_backend == StoreBackend::Memory {
        tracing::warn!("using in-memory customer store; records will not survive restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = config
        .database_url
        .as_ref()
        .ok_or_else(|| ConfigError::MissingEnvVar("CLIENTELE_DATABASE_URL".into()))?;
    let pool = create_pool(database_url).await?;

    Ok(if config.store_backend == StoreBackend::Orm {
        Arc::new(OrmStore::new(pool))
    } else {
        Arc::new(StatementStore::new(pool))
    })
}
