//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use database::mongodb::{datetime_bson, ensure_index, id_filter, is_duplicate_key_error, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

pub const COLLECTION: &str = "events";

pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<Event>(COLLECTION),
        }
    }

    /// Unique name plus lookup indexes for host and start time.
    pub async fn create_indexes(&self) -> EventResult<()> {
        ensure_index(&self.collection, doc! { "name": 1 }, "events_name_unique", true).await?;
        ensure_index(
            &self.collection,
            doc! { "host_id": 1, "start_time": 1 },
            "events_host_start",
            false,
        )
        .await?;
        ensure_index(&self.collection, doc! { "start_time": 1 }, "events_start", false).await?;
        Ok(())
    }

    fn build_filter(filter: &EventFilter) -> Document {
        let mut doc = doc! {};

        if let Some(host_id) = &filter.host_id {
            doc.insert("host_id", uuid_bson(host_id));
        }
        if let Some(status_id) = &filter.status_id {
            doc.insert("status_id", uuid_bson(status_id));
        }
        if let Some(category_id) = &filter.category_id {
            doc.insert("category_id", uuid_bson(category_id));
        }

        let mut start = Document::new();
        if let Some(from) = &filter.from {
            start.insert("$gte", datetime_bson(from));
        }
        if let Some(to) = &filter.to {
            start.insert("$lte", datetime_bson(to));
        }
        if !start.is_empty() {
            doc.insert("start_time", start);
        }

        doc
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id, event_name = %event.name))]
    async fn create(&self, event: Event) -> EventResult<Event> {
        match self.collection.insert_one(&event).await {
            Ok(_) => {
                tracing::info!(event_id = %event.id, "Event created");
                Ok(event)
            }
            Err(e) if is_duplicate_key_error(&e) => Err(EventError::DuplicateName(event.name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let options = FindOptions::builder()
            .sort(doc! { "start_time": 1 })
            .skip(filter.offset)
            .limit(filter.limit)
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> EventResult<Vec<Event>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: Event) -> EventResult<Event> {
        let result = match self.collection.replace_one(id_filter(event.id), &event).await {
            Ok(result) => result,
            Err(e) if is_duplicate_key_error(&e) => {
                return Err(EventError::DuplicateName(event.name));
            }
            Err(e) => return Err(e.into()),
        };

        if result.matched_count == 0 {
            return Err(EventError::NotFound(event.id));
        }

        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
