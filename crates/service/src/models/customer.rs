//! Customer domain types.
//!
//! These types represent validated domain objects separate from database
//! row types. [`Customer`] deliberately does not implement `Serialize`;
//! only [`CustomerView`] crosses the boundary, and it carries no
//! credential material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clientele_core::{CustomerId, Email, Gender};

/// A customer record (domain type).
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID, assigned by the store on insert.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
    /// Customer's email address (unique among all records).
    pub email: Email,
    /// One-way password hash, set at registration.
    pub password_hash: String,
    /// Customer's age in years (always positive).
    pub age: i32,
    /// Customer's gender.
    pub gender: Gender,
    /// Opaque profile-image identifier; `None` until an upload succeeds.
    pub profile_image_id: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A customer record before the store has assigned an ID.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub age: i32,
    pub gender: Gender,
}

/// The externally visible projection of a [`Customer`].
///
/// Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub age: i32,
    pub gender: Gender,
    pub profile_image_id: Option<String>,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            age: customer.age,
            gender: customer.gender,
            profile_image_id: customer.profile_image_id,
        }
    }
}

/// Input shape for customer registration.
///
/// Deserialized and structurally validated upstream; the service still
/// parses the email and enforces the domain invariants.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    /// Plaintext password; hashed once at registration and never stored.
    pub password: String,
    pub age: i32,
    pub gender: Gender,
}

/// Input shape for a partial customer update.
///
/// Absent fields are left untouched; present-but-equal fields do not
/// count as a change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}
