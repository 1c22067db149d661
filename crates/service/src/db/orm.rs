//! Row-mapped customer store.
//!
//! The object-relational variant: queries decode into a derived
//! [`CustomerRow`] type which converts to the domain type via `TryFrom`,
//! and scans go through the declarative [`Page`] wrapper instead of a
//! hand-written limit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use clientele_core::{CustomerId, Email, Gender};

use super::{CustomerStore, PAGE_SIZE, Page, RepositoryError};
use crate::models::{Customer, NewCustomer};

const COLUMNS: &str =
    "id, name, email, password, age, gender, profile_image_id, created_at, updated_at";

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    email: String,
    password: String,
    age: i32,
    gender: String,
    profile_image_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let gender = row.gender.parse::<Gender>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid gender in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            email,
            password_hash: row.password,
            age: row.age,
            gender,
            profile_image_id: row.profile_image_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row-mapped store over a `PostgreSQL` pool.
pub struct OrmStore {
    pool: PgPool,
    page: Page,
}

impl OrmStore {
    /// Create a new row-mapped store with the contract page size.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            page: Page::of(PAGE_SIZE),
        }
    }
}

#[async_trait]
impl CustomerStore for OrmStore {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM customer ORDER BY id {}",
            self.page.fetch_clause()
        );
        let rows = sqlx::query_as::<_, CustomerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE email = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let sql = format!(
            "INSERT INTO customer (name, email, password, age, gender) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.password_hash)
            .bind(customer.age)
            .bind(customer.gender.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("email already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        row.try_into()
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
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

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
