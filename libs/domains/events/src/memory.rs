use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

/// In-memory EventRepository (for development/testing)
///
/// Keeps insertion order so `list_all` matches what MongoDB returns.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;

        if events.iter().any(|e| e.name == event.name) {
            return Err(EventError::DuplicateName(event.name));
        }

        events.push(event.clone());
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;

        let mut result: Vec<Event> = events.iter().filter(|e| e.matches(&filter)).cloned().collect();
        result.sort_by_key(|e| e.start_time);

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn list_all(&self) -> EventResult<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn update(&self, event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;

        if events.iter().any(|e| e.id != event.id && e.name == event.name) {
            return Err(EventError::DuplicateName(event.name));
        }

        let slot = events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or(EventError::NotFound(event.id))?;
        *slot = event.clone();
        Ok(event)
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }
}
