use async_trait::async_trait;
use std::time::Duration;

use crate::error::ImageResult;

/// Bucket operations the API needs. Clients upload and download directly
/// against the presigned URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// URL for a PUT of `key`, recording the client's file name as object
    /// metadata.
    async fn presign_upload(
        &self,
        key: &str,
        file_name: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> ImageResult<String>;

    async fn presign_download(&self, key: &str, expires_in: Duration) -> ImageResult<String>;

    async fn delete(&self, key: &str) -> ImageResult<()>;
}
