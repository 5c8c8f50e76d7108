use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ImageError, ImageResult};
use crate::models::{CreateEventImage, EventImage, PresignUploadRequest, PresignedUrl};
use crate::repository::EventImageRepository;
use crate::storage::ObjectStorage;

/// Image records attached to events.
pub struct EventImageService<R: EventImageRepository> {
    repository: Arc<R>,
}

impl<R: EventImageRepository> EventImageService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Adding a thumbnail demotes the event's previous one.
    #[instrument(skip(self, input), fields(event_id = %input.event_id, is_thumbnail = input.is_thumbnail))]
    pub async fn add_image(&self, input: CreateEventImage) -> ImageResult<EventImage> {
        input
            .validate()
            .map_err(|e| ImageError::Validation(e.to_string()))?;

        if input.is_thumbnail {
            let demoted = self.repository.clear_thumbnail(input.event_id).await?;
            if demoted > 0 {
                tracing::debug!(demoted, "Previous thumbnail demoted");
            }
        }

        let image = self.repository.create(EventImage::new(input)).await?;
        tracing::info!(image_id = %image.id, "Event image added");
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self) -> ImageResult<Vec<EventImage>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn list_for_event(&self, event_id: Uuid) -> ImageResult<Vec<EventImage>> {
        self.repository.list_by_event(event_id).await
    }
}

impl<R: EventImageRepository> Clone for EventImageService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Presigned access to the image bucket.
pub struct ImageStorageService<S: ObjectStorage> {
    storage: Arc<S>,
    expires_in: Duration,
}

impl<S: ObjectStorage> ImageStorageService<S> {
    pub fn new(storage: S, expires_in: Duration) -> Self {
        Self {
            storage: Arc::new(storage),
            expires_in,
        }
    }

    /// Upload URL under a fresh random key.
    #[instrument(skip(self, request), fields(content_type = %request.content_type))]
    pub async fn presign_upload(&self, request: PresignUploadRequest) -> ImageResult<PresignedUrl> {
        request
            .validate()
            .map_err(|e| ImageError::Validation(e.to_string()))?;
        if request.file_name.trim().is_empty() || request.content_type.trim().is_empty() {
            return Err(ImageError::Validation(
                "file_name and content_type are required".to_string(),
            ));
        }

        let key = Uuid::new_v4().to_string();
        let url = self
            .storage
            .presign_upload(&key, &request.file_name, &request.content_type, self.expires_in)
            .await?;

        tracing::info!(key = %key, "Upload URL issued");
        Ok(PresignedUrl { key, url })
    }

    #[instrument(skip(self))]
    pub async fn presign_download(&self, key: String) -> ImageResult<PresignedUrl> {
        let key = validate_key(key)?;
        let url = self.storage.presign_download(&key, self.expires_in).await?;
        Ok(PresignedUrl { key, url })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, key: String) -> ImageResult<()> {
        let key = validate_key(key)?;
        self.storage.delete(&key).await?;
        tracing::info!(key = %key, "Image object deleted");
        Ok(())
    }
}

impl<S: ObjectStorage> Clone for ImageStorageService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            expires_in: self.expires_in,
        }
    }
}

fn validate_key(key: String) -> ImageResult<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(ImageError::Validation("object key is required".to_string()));
    }
    Ok(trimmed.to_string())
}
