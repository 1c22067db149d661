//! Statement-backed customer store.
//!
//! Direct parameterized statements against `PostgreSQL`. Queries use
//! runtime binding; rows are mapped to the domain type by a pure
//! row-mapper function with no business logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use clientele_core::{CustomerId, Email, Gender};

use super::{CustomerStore, PAGE_SIZE, RepositoryError};
use crate::models::{Customer, NewCustomer};

/// Statement-backed store over a `PostgreSQL` pool.
pub struct StatementStore {
    pool: PgPool,
}

impl StatementStore {
    /// Create a new statement-backed store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a raw row to a [`Customer`].
///
/// Pure, stateless transform; invalid stored values surface as
/// [`RepositoryError::DataCorruption`].
fn map_row(row: &PgRow) -> Result<Customer, RepositoryError> {
    let email: String = row.try_get("email")?;
    let email = Email::parse(&email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;

    let gender: String = row.try_get("gender")?;
    let gender = gender
        .parse::<Gender>()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid gender in database: {e}")))?;

    Ok(Customer {
        id: CustomerId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        email,
        password_hash: row.try_get("password")?,
        age: row.try_get("age")?,
        gender,
        profile_image_id: row.try_get("profile_image_id")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Translate a unique-violation into [`RepositoryError::Conflict`].
fn map_insert_err(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl CustomerStore for StatementStore {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, email, password, age, gender, profile_image_id, \
                    created_at, updated_at \
             FROM customer \
             ORDER BY id \
             LIMIT $1",
        )
        .bind(PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, age, gender, profile_image_id, \
                    created_at, updated_at \
             FROM customer \
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, age, gender, profile_image_id, \
                    created_at, updated_at \
             FROM customer \
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO customer (name, email, password, age, gender) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, created_at, updated_at",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(customer.age)
        .bind(customer.gender.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_err)?;

        Ok(Customer {
            id: CustomerId::new(row.try_get("id")?),
            name: customer.name,
            email: customer.email,
            password_hash: customer.password_hash,
            age: customer.age,
            gender: customer.gender,
            profile_image_id: None,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE customer \
             SET name = $1, email = $2, password = $3, age = $4, gender = $5, \
                 updated_at = now() \
             WHERE id = $6",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(customer.age)
        .bind(customer.gender.as_str())
        .bind(customer.id)
        .execute(&self.pool)
        .await
        .map_err(map_insert_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customer WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customer WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_profile_image_id(
        &self,
        image_id: &str,
        id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE customer SET profile_image_id = $1, updated_at = now() WHERE id = $2",
        )
        .bind(image_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
