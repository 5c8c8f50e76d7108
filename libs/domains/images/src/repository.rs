use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ImageResult;
use crate::models::EventImage;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventImageRepository: Send + Sync {
    async fn create(&self, image: EventImage) -> ImageResult<EventImage>;

    async fn list(&self) -> ImageResult<Vec<EventImage>>;

    async fn list_by_event(&self, event_id: Uuid) -> ImageResult<Vec<EventImage>>;

    /// Unset `is_thumbnail` on every image of the event. Returns how many
    /// images changed.
    async fn clear_thumbnail(&self, event_id: Uuid) -> ImageResult<u64>;
}
