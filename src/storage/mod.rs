//! Object storage for event posters and photos.
//!
//! [`BlobStore`] is the port the service writes through; the concrete
//! adapter [`ObjectStoreBackend`] drives any `object_store` implementation
//! (S3/MinIO in production, in-memory in tests). [`MediaStorage`] sits on
//! top and owns key derivation and public URL construction.
//! [`S3BucketAdmin`] checks and creates the bucket itself.

pub mod backend;
pub mod bucket;
pub mod media;

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

pub use backend::ObjectStoreBackend;
pub use bucket::S3BucketAdmin;
pub use media::{MediaStorage, StoredMedia};

/// Errors surfaced by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store could not be initialized at startup.
    #[error("object storage service not available")]
    Unavailable,

    /// The configured bucket does not exist.
    #[error("bucket does not exist")]
    BucketMissing,

    /// A bucket-level request (existence check or creation) failed.
    #[error("bucket request failed: {0}")]
    Bucket(String),

    /// The underlying store rejected the operation.
    #[error(transparent)]
    Backend(#[from] object_store::Error),
}

/// Bucket-scoped blob storage. The bucket is fixed at construction.
#[async_trait]
pub trait BlobStore: fmt::Debug + Send + Sync {
    /// Writes `body` under `key` with the given content type.
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Removes the object stored under `key`.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Verifies that the bucket exists and is reachable. Reports
    /// [`StorageError::BucketMissing`] when it does not exist.
    async fn check_bucket(&self) -> Result<(), StorageError>;

    /// Creates the bucket. Succeeds if it already exists.
    async fn create_bucket(&self) -> Result<(), StorageError>;
}

/// A file part received from a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Creates a file from its parts.
    #[must_use]
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Size of the file in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// `true` for the placeholder part browsers send when no file was picked.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty() && self.file_name.as_deref().is_none_or(str::is_empty)
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Files attached to a create or update request.
#[derive(Debug, Clone, Default)]
pub struct EventMedia {
    /// Replacement main poster.
    pub main_poster: Option<UploadedFile>,
    /// Photos, in the order they were sent.
    pub photos: Vec<UploadedFile>,
}

impl EventMedia {
    /// `true` when no file was attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main_poster.is_none() && self.photos.is_empty()
    }
}
