use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::error::StorageError;
use crate::objects;

/// Content type used for summary objects.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// The two bucket operations the pipeline needs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// [`ObjectStore`] backed by a real S3 client.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = objects::get_object(&self.client, bucket, key).await?;
        debug!(
            bucket,
            key,
            bytes = output.body.len(),
            content_type = output.content_type.as_deref().unwrap_or(""),
            "fetched object"
        );
        Ok(output.body)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let etag = objects::put_object(&self.client, bucket, key, body, Some(content_type)).await?;
        debug!(bucket, key, etag, "stored object");
        Ok(())
    }
}
