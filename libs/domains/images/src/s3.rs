//! S3 implementation of ObjectStorage
//!
//! Credentials come from the default AWS provider chain (environment, web
//! identity, instance profile or shared config).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{Client, presigning::PresigningConfig};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::S3Config;
use crate::error::{ImageError, ImageResult};
use crate::storage::ObjectStorage;

/// Object metadata key holding the uploader's original file name
pub const FILE_NAME_METADATA: &str = "file-name";

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        debug!(bucket = %config.bucket, endpoint = ?config.endpoint_url, "S3 client configured");
        Self::new(Client::from_conf(builder.build()), config.bucket.clone())
    }
}

fn presigning(expires_in: Duration) -> ImageResult<PresigningConfig> {
    PresigningConfig::expires_in(expires_in).map_err(|e| ImageError::Storage(e.to_string()))
}

#[async_trait]
impl ObjectStorage for S3Storage {
    #[instrument(skip(self, file_name), fields(bucket = %self.bucket))]
    async fn presign_upload(
        &self,
        key: &str,
        file_name: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> ImageResult<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .metadata(FILE_NAME_METADATA, file_name)
            .presigned(presigning(expires_in)?)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;

        Ok(request.uri().to_string())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_download(&self, key: &str, expires_in: Duration) -> ImageResult<String> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning(expires_in)?)
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;

        Ok(request.uri().to_string())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, key: &str) -> ImageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ImageError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presigning_rejects_overlong_expiry() {
        // S3 caps presigned URLs at one week
        assert!(presigning(Duration::from_secs(600)).is_ok());
        assert!(presigning(Duration::from_secs(8 * 24 * 3600)).is_err());
    }
}
