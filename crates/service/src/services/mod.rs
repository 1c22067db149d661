//! Domain services.

pub mod customer;
pub mod hasher;

pub use customer::{CustomerError, CustomerService};
pub use hasher::{Argon2Hasher, CredentialHasher, HashError};
