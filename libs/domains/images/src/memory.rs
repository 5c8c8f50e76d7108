use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ImageResult;
use crate::models::EventImage;
use crate::repository::EventImageRepository;

/// In-memory EventImageRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventImageRepository {
    images: Arc<RwLock<Vec<EventImage>>>,
}

impl InMemoryEventImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventImageRepository for InMemoryEventImageRepository {
    async fn create(&self, image: EventImage) -> ImageResult<EventImage> {
        self.images.write().await.push(image.clone());
        Ok(image)
    }

    async fn list(&self) -> ImageResult<Vec<EventImage>> {
        Ok(self.images.read().await.clone())
    }

    async fn list_by_event(&self, event_id: Uuid) -> ImageResult<Vec<EventImage>> {
        Ok(self
            .images
            .read()
            .await
            .iter()
            .filter(|image| image.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn clear_thumbnail(&self, event_id: Uuid) -> ImageResult<u64> {
        let mut changed = 0;
        for image in self.images.write().await.iter_mut() {
            if image.event_id == event_id && image.is_thumbnail {
                image.is_thumbnail = false;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
