use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventFilter};

/// Storage for events.
///
/// `create` must refuse a second event with the same name by returning
/// [`EventError::DuplicateName`](crate::EventError::DuplicateName).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event) -> EventResult<Event>;

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Filtered, paginated listing
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>>;

    /// Every stored event in creation order, unpaginated
    async fn list_all(&self) -> EventResult<Vec<Event>>;

    /// Replace the stored document with `event`
    async fn update(&self, event: Event) -> EventResult<Event>;

    async fn delete(&self, id: Uuid) -> EventResult<bool>;
}
