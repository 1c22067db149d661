//! Blob storage for opaque byte payloads.
//!
//! Bucket+key addressed storage used only for customer profile images.
//! [`S3BlobStore`] is the production backend; [`MemoryBlobStore`] mirrors
//! the persistence layer's in-memory variant for tests and store-free
//! prototyping.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// Errors that can occur during blob operations.
///
/// Deliberately generic: the service layer decides whether a failure is
/// worth translating into a domain error kind.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Writing the object failed.
    #[error("put object failed: {0}")]
    Put(String),

    /// Reading the object failed (missing key included).
    #[error("get object failed: {0}")]
    Get(String),
}

/// Addressable byte-payload storage keyed by bucket+key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes at `bucket`/`key`, overwriting any existing object.
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), BlobError>;

    /// Read the bytes at `bucket`/`key`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError>;
}
