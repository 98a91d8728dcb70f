//! [`BlobStore`] adapter over the `object_store` crate.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use super::{BlobStore, S3BucketAdmin, StorageError};
use crate::config::StorageConfig;

/// Bucket-scoped store backed by any [`ObjectStore`].
///
/// S3 backends also carry an [`S3BucketAdmin`] for bucket checks and
/// creation. Other stores have no bucket to manage.
#[derive(Debug, Clone)]
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
    admin: Option<S3BucketAdmin>,
}

impl ObjectStoreBackend {
    /// Wraps an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store, admin: None }
    }

    /// Builds an S3 client for the configured MinIO/S3 endpoint.
    ///
    /// Uses path-style addressing so that object URLs take the form
    /// `{endpoint}/{bucket}/{key}`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the client configuration is
    /// rejected.
    pub fn s3(config: &StorageConfig) -> Result<Self, StorageError> {
        let store = AmazonS3Builder::new()
            .with_endpoint(config.endpoint_url())
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key)
            .with_secret_access_key(&config.secret_key)
            .with_region(&config.region)
            .with_allow_http(!config.secure)
            .with_virtual_hosted_style_request(false)
            .build()?;
        Ok(Self {
            store: Arc::new(store),
            admin: Some(S3BucketAdmin::new(config)),
        })
    }

    /// Process-local store, used by tests and database-less local runs.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBackend {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..PutOptions::default()
        };
        self.store
            .put_opts(&Path::from(key), PutPayload::from(body), opts)
            .await?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(&Path::from(key)).await?;
        Ok(())
    }

    async fn check_bucket(&self) -> Result<(), StorageError> {
        if let Some(admin) = &self.admin {
            if admin.exists().await? {
                return Ok(());
            }
            return Err(StorageError::BucketMissing);
        }
        match self.store.list_with_delimiter(None).await {
            Ok(_) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Err(StorageError::BucketMissing),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_bucket(&self) -> Result<(), StorageError> {
        match &self.admin {
            Some(admin) => admin.create().await,
            None => Ok(()),
        }
    }
}
