//! Customer domain service.
//!
//! Orchestrates validation, uniqueness checks, and diff-merge updates,
//! delegating persistence to [`CustomerStore`] and image bytes to
//! [`BlobStore`]. Each operation is a single request with no
//! cross-request coordination; the uniqueness pre-checks are
//! check-then-act, with the storage layer's unique constraint as the
//! backstop.

mod error;

pub use error::CustomerError;

use std::sync::Arc;

use uuid::Uuid;

use clientele_core::{CustomerId, Email};

use crate::blob::BlobStore;
use crate::db::CustomerStore;
use crate::models::{CustomerView, NewCustomer, RegistrationRequest, UpdateRequest};
use crate::services::hasher::CredentialHasher;

/// Customer domain service.
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    blob: Arc<dyn BlobStore>,
    hasher: Arc<dyn CredentialHasher>,
    bucket: String,
}

impl CustomerService {
    /// Create a new customer service over the given collaborators.
    ///
    /// `bucket` is the blob-store bucket holding profile images,
    /// resolved from configuration by the caller.
    pub fn new(
        store: Arc<dyn CustomerStore>,
        blob: Arc<dyn BlobStore>,
        hasher: Arc<dyn CredentialHasher>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            blob,
            hasher,
            bucket: bucket.into(),
        }
    }

    /// List customers, projected to views (never exposes credentials).
    ///
    /// Bounded to the store's fixed page size.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn get_all_customers(&self) -> Result<Vec<CustomerView>, CustomerError> {
        let customers = self.store.list_all().await?;
        Ok(customers.into_iter().map(CustomerView::from).collect())
    }

    /// Get a single customer view by ID.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist.
    pub async fn get_customer(&self, id: CustomerId) -> Result<CustomerView, CustomerError> {
        self.store
            .get_by_id(id)
            .await?
            .map(CustomerView::from)
            .ok_or(CustomerError::NotFound { id })
    }

    /// Register a new customer.
    ///
    /// Enforces email uniqueness and hashes the plaintext password once;
    /// the plaintext is never stored.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::DuplicateEmail` if the email is taken,
    /// `CustomerError::InvalidEmail` / `CustomerError::Validation` if the
    /// request violates a domain invariant.
    pub async fn add_customer(
        &self,
        request: RegistrationRequest,
    ) -> Result<CustomerView, CustomerError> {
        let email = Email::parse(&request.email)?;
        validate_name(&request.name)?;
        validate_age(request.age)?;

        if self.store.exists_by_email(&email).await? {
            return Err(CustomerError::DuplicateEmail {
                email: email.into_inner(),
            });
        }

        let password_hash = self.hasher.encode(&request.password)?;
        let customer = self
            .store
            .insert(NewCustomer {
                name: request.name,
                email,
                password_hash,
                age: request.age,
                gender: request.gender,
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "registered customer");
        Ok(CustomerView::from(customer))
    }

    /// Apply a partial update: diff against the current record, reject
    /// no-ops.
    ///
    /// Absent fields are left untouched; present-but-equal fields do not
    /// count as a change. Email uniqueness is re-checked only when the
    /// email actually differs from the current value.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist,
    /// `CustomerError::DuplicateEmail` if a changed email is taken, and
    /// `CustomerError::Validation` if nothing changed.
    pub async fn update_customer(
        &self,
        id: CustomerId,
        request: UpdateRequest,
    ) -> Result<CustomerView, CustomerError> {
        let mut customer = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound { id })?;

        let mut changes = false;

        if let Some(name) = request.name
            && name != customer.name
        {
            validate_name(&name)?;
            customer.name = name;
            changes = true;
        }

        if let Some(email) = request.email {
            let email = Email::parse(&email)?;
            if email != customer.email {
                if self.store.exists_by_email(&email).await? {
                    return Err(CustomerError::DuplicateEmail {
                        email: email.into_inner(),
                    });
                }
                customer.email = email;
                changes = true;
            }
        }

        if let Some(age) = request.age
            && age != customer.age
        {
            validate_age(age)?;
            customer.age = age;
            changes = true;
        }

        if !changes {
            return Err(CustomerError::Validation(
                "customer information not changed".to_owned(),
            ));
        }

        self.store.update(&customer).await?;
        Ok(CustomerView::from(customer))
    }

    /// Delete a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist.
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::NotFound { id });
        }
        self.store.delete_by_id(id).await?;

        tracing::info!(customer_id = %id, "deleted customer");
        Ok(())
    }

    /// Store a profile image and link it to the customer.
    ///
    /// A fresh opaque image ID is generated per upload. If the blob write
    /// fails the image pointer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist,
    /// or `CustomerError::Upload` wrapping the blob failure.
    pub async fn upload_profile_image(
        &self,
        id: CustomerId,
        bytes: Vec<u8>,
    ) -> Result<(), CustomerError> {
        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::NotFound { id });
        }

        let image_id = Uuid::new_v4().to_string();
        let key = profile_image_key(id, &image_id);

        self.blob
            .put(&self.bucket, &key, bytes)
            .await
            .map_err(CustomerError::Upload)?;

        self.store.update_profile_image_id(&image_id, id).await?;

        tracing::info!(customer_id = %id, image_id = %image_id, "uploaded profile image");
        Ok(())
    }

    /// Read back the customer's profile image bytes.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the customer does not exist,
    /// `CustomerError::ImageNotSet` if no image was ever uploaded; blob
    /// read failures propagate untranslated.
    pub async fn get_profile_image(&self, id: CustomerId) -> Result<Vec<u8>, CustomerError> {
        let customer = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound { id })?;

        let image_id = customer
            .profile_image_id
            .as_deref()
            .filter(|image_id| !image_id.is_empty())
            .ok_or(CustomerError::ImageNotSet { id })?;

        let key = profile_image_key(id, image_id);
        let bytes = self.blob.get(&self.bucket, &key).await?;
        Ok(bytes)
    }
}

/// Blob key for a customer's profile image.
fn profile_image_key(id: CustomerId, image_id: &str) -> String {
    format!("profile-images/{id}/{image_id}")
}

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::Validation(
            "customer name cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), CustomerError> {
    if age <= 0 {
        return Err(CustomerError::Validation(
            "customer age must be positive".to_owned(),
        ));
    }
    Ok(())
}
