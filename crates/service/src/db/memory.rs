//! In-memory customer store.
//!
//! An owned, injectable state container with its lifecycle tied to the
//! instance: an ordered collection behind a mutex, assigning sequential
//! IDs starting at 1. Used where no durable store is configured, and in
//! tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use clientele_core::{CustomerId, Email};

use super::{CustomerStore, PAGE_SIZE, RepositoryError};
use crate::models::{Customer, NewCustomer};

#[derive(Debug)]
struct Inner {
    customers: Vec<Customer>,
    next_id: i32,
}

/// In-memory store backed by an ordered `Vec`.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store; the first inserted customer gets ID 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                customers: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let inner = self.inner.lock().await;
        let page = usize::try_from(PAGE_SIZE).unwrap_or(usize::MAX);
        Ok(inner.customers.iter().take(page).cloned().collect())
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().find(|c| &c.email == email).cloned())
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut inner = self.inner.lock().await;

        // Uniqueness backstop, mirroring the SQL backends' constraint.
        if inner.customers.iter().any(|c| c.email == customer.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let stored = Customer {
            id: CustomerId::new(inner.next_id),
            name: customer.name,
            email: customer.email,
            password_hash: customer.password_hash,
            age: customer.age,
            gender: customer.gender,
            profile_image_id: None,
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.customers.push(stored.clone());

        Ok(stored)
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;

        // A missing row reports NotFound before the uniqueness backstop
        // fires, matching the SQL backends (0 rows affected, constraint
        // never evaluated).
        if !inner.customers.iter().any(|c| c.id == customer.id) {
            return Err(RepositoryError::NotFound);
        }

        if inner
            .customers
            .iter()
            .any(|c| c.id != customer.id && c.email == customer.email)
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let existing = inner
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(RepositoryError::NotFound)?;

        // Attribute columns only; the image pointer has its own operation.
        existing.name = customer.name.clone();
        existing.email = customer.email.clone();
        existing.password_hash = customer.password_hash.clone();
        existing.age = customer.age;
        existing.gender = customer.gender;
        existing.updated_at = Utc::now();

        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().any(|c| &c.email == email))
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.customers.iter().any(|c| c.id == id))
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        inner.customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn update_profile_image_id(
        &self,
        image_id: &str,
        id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        let existing = inner
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;

        existing.profile_image_id = Some(image_id.to_owned());
        existing.updated_at = Utc::now();

        Ok(())
    }
}
