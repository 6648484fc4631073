use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use thiserror::Error;

/// Access-control flag attached to a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no such object key: {0}")]
    NotFound(String),

    #[error("remote store error ({code}): {message}")]
    Remote { code: String, message: String },
}

impl StoreError {
    fn remote(code: Option<&str>, message: Option<&str>) -> Self {
        StoreError::Remote {
            code: code.unwrap_or("unknown").to_string(),
            message: message.unwrap_or("remote call failed").to_string(),
        }
    }
}

/// The remote blob store, reduced to the four calls the relays need.
///
/// Failures surface as typed outcomes and are never retried here.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        visibility: Visibility,
    ) -> Result<(), StoreError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data));
        if visibility == Visibility::Public {
            req = req.acl(ObjectCannedAcl::PublicRead);
        }
        req.send()
            .await
            .map_err(|e| StoreError::remote(e.code(), e.message()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let res = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(out) => {
                let data = out.body.collect().await.map_err(|e| {
                    StoreError::remote(Some("ByteStreamError"), Some(&e.to_string()))
                })?;
                Ok(data.to_vec())
            }
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::remote(e.code(), e.message())),
        }
    }

    /// Deletes by key. The remote delete is idempotent, so "object did not
    /// exist" and "object deleted" both come back as success.
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::remote(e.code(), e.message()))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let res = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(StoreError::remote(
                        service_error.code(),
                        service_error.message(),
                    ))
                }
            }
        }
    }
}
