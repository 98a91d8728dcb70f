//! Upload adapter: object keys, writes and public URLs.

use std::sync::Arc;

use super::{BlobStore, StorageError, UploadedFile};
use crate::config::StorageConfig;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An object written by [`MediaStorage::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Object key inside the bucket.
    pub key: String,
    /// Public URL of the object.
    pub url: String,
}

/// Writes uploaded files to the bucket and hands back their URLs.
///
/// Holds no backend when the store could not be reached at startup; every
/// call then fails fast with [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct MediaStorage {
    backend: Option<Arc<dyn BlobStore>>,
    public_base: String,
}

impl MediaStorage {
    /// Creates storage writing through `backend`, with URLs of the form
    /// `{scheme}://{endpoint}/{bucket}/{key}`.
    #[must_use]
    pub fn new(backend: Arc<dyn BlobStore>, config: &StorageConfig) -> Self {
        Self {
            backend: Some(backend),
            public_base: public_base(config),
        }
    }

    /// Creates storage whose every operation fails with
    /// [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable(config: &StorageConfig) -> Self {
        Self {
            backend: None,
            public_base: public_base(config),
        }
    }

    /// Whether a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Public URL an object key is reachable at.
    #[must_use]
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }

    /// Uploads one file under a fresh random key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] without a backend and
    /// [`StorageError::Backend`] if the write fails. No retry is attempted.
    pub async fn upload(&self, file: &UploadedFile) -> Result<StoredMedia, StorageError> {
        let backend = self.backend.as_ref().ok_or(StorageError::Unavailable)?;
        let key = object_key(file.file_name.as_deref());
        let content_type = file
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        backend
            .put_object(&key, file.data.clone(), content_type)
            .await?;

        tracing::debug!(%key, size = file.size(), content_type, "object uploaded");
        let url = self.url_for(&key);
        Ok(StoredMedia { key, url })
    }

    /// Deletes a previously uploaded object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] without a backend and
    /// [`StorageError::Backend`] if the delete fails.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let backend = self.backend.as_ref().ok_or(StorageError::Unavailable)?;
        backend.delete_object(key).await
    }

    /// Best-effort removal of objects orphaned by a failed request.
    pub async fn discard(&self, media: &[StoredMedia]) {
        for item in media {
            if let Err(error) = self.remove(&item.key).await {
                tracing::warn!(key = %item.key, %error, "failed to remove orphaned upload");
            }
        }
    }

    /// Verifies the bucket is reachable, creating it first if it is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if there is no backend, the check fails for
    /// another reason, or creation fails.
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        let backend = self.backend.as_ref().ok_or(StorageError::Unavailable)?;
        match backend.check_bucket().await {
            Err(StorageError::BucketMissing) => {
                tracing::info!("bucket missing; creating it");
                backend.create_bucket().await?;
                backend.check_bucket().await
            }
            other => other,
        }
    }
}

fn public_base(config: &StorageConfig) -> String {
    format!("{}/{}", config.endpoint_url(), config.bucket)
}

/// Derives a collision-resistant object key from a random UUID and the
/// extension of `file_name` (the text after its last `.`).
///
/// Names without an extension yield the bare UUID.
#[must_use]
pub fn object_key(file_name: Option<&str>) -> String {
    let id = uuid::Uuid::new_v4();
    match file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
    {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}
