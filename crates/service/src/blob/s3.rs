//! S3-backed blob store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use super::{BlobError, BlobStore};

/// Blob store over an S3 client.
pub struct S3BlobStore {
    client: Client,
}

impl S3BlobStore {
    /// Create a blob store over an existing client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS environment (credentials,
    /// region, endpoint overrides).
    pub async fn from_env() -> Self {
        let shared = aws_config::from_env().load().await;
        Self {
            client: Client::new(&shared),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BlobError::Put(format!("s3 put_object {bucket}/{key}: {e}")))?;

        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BlobError::Get(format!("s3 get_object {bucket}/{key}: {e}")))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Get(format!("s3 read body {bucket}/{key}: {e}")))?;

        Ok(data.into_bytes().to_vec())
    }
}
