//! One-way credential hashing.
//!
//! The service consumes [`CredentialHasher`] as a collaborator interface
//! and calls it exactly once, at registration. Verification belongs to
//! the authentication subsystem, which is outside this core.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Error returned when a credential cannot be hashed.
#[derive(Debug, Error)]
#[error("credential hashing failed")]
pub struct HashError;

/// One-way credential hasher.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext credential into an opaque storable string.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if hashing fails.
    fn encode(&self, plaintext: &str) -> Result<String, HashError>;
}

/// Argon2id hasher with a fresh random salt per credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn encode(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| HashError)
    }
}
