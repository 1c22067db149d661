//! In-memory blob store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BlobError, BlobStore};

/// In-memory blob store keyed by bucket+key.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        let mut objects = self.objects.lock().await;
        objects.insert((bucket.to_owned(), key.to_owned()), bytes);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let objects = self.objects.lock().await;
        objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| BlobError::Get(format!("object not found: {bucket}/{key}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryBlobStore::new();
        store.put("customer", "foo", b"Hello World!".to_vec()).await.unwrap();

        let bytes = store.get("customer", "foo").await.unwrap();
        assert_eq!(bytes, b"Hello World!");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryBlobStore::new();
        store.put("customer", "foo", b"one".to_vec()).await.unwrap();
        store.put("customer", "foo", b"two".to_vec()).await.unwrap();

        assert_eq!(store.get("customer", "foo").await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_get_missing_fails() {
        let store = MemoryBlobStore::new();
        assert!(matches!(
            store.get("customer", "absent").await,
            Err(BlobError::Get(_))
        ));
    }
}
