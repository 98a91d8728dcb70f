//! Bucket administration over the S3 API.

use std::fmt;

use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use super::StorageError;
use crate::config::StorageConfig;

/// Region S3 creates buckets in when no location constraint is sent.
const DEFAULT_REGION: &str = "us-east-1";

/// Checks for and creates the configured bucket.
#[derive(Clone)]
pub struct S3BucketAdmin {
    client: Client,
    bucket: String,
    region: String,
}

impl S3BucketAdmin {
    /// Builds a path-style client for the configured endpoint and keys.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "event-builder",
        );
        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint_url())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        }
    }

    /// Name of the managed bucket.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns whether the bucket exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Bucket`] if the store cannot be asked.
    pub async fn exists(&self) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(HeadBucketError::is_not_found) => {
                Ok(false)
            }
            Err(err) => Err(StorageError::Bucket(DisplayErrorContext(&err).to_string())),
        }
    }

    /// Creates the bucket. A bucket that already exists counts as success.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Bucket`] if the store rejects the request.
    pub async fn create(&self) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(&self.bucket);
        if let Some(constraint) = location_constraint(&self.region) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, "bucket created");
                Ok(())
            }
            Err(err) if err.as_service_error().is_some_and(already_exists) => Ok(()),
            Err(err) => Err(StorageError::Bucket(DisplayErrorContext(&err).to_string())),
        }
    }
}

impl fmt::Debug for S3BucketAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3BucketAdmin")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

fn already_exists(err: &CreateBucketError) -> bool {
    err.is_bucket_already_owned_by_you() || err.is_bucket_already_exists()
}

/// `us-east-1` must be sent without a location constraint.
fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    (!region.is_empty() && region != DEFAULT_REGION)
        .then(|| BucketLocationConstraint::from(region))
}
