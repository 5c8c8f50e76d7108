//! MongoDB implementation of EventImageRepository

use async_trait::async_trait;
use database::mongodb::{ensure_index, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ImageResult;
use crate::models::EventImage;
use crate::repository::EventImageRepository;

pub const COLLECTION: &str = "event_images";

pub struct MongoEventImageRepository {
    collection: Collection<EventImage>,
}

impl MongoEventImageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<EventImage>(COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> ImageResult<()> {
        ensure_index(&self.collection, doc! { "event_id": 1 }, "event_images_event", false).await?;
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> ImageResult<Vec<EventImage>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl EventImageRepository for MongoEventImageRepository {
    #[instrument(skip(self, image), fields(event_id = %image.event_id))]
    async fn create(&self, image: EventImage) -> ImageResult<EventImage> {
        self.collection.insert_one(&image).await?;
        Ok(image)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ImageResult<Vec<EventImage>> {
        self.find_many(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_event(&self, event_id: Uuid) -> ImageResult<Vec<EventImage>> {
        self.find_many(doc! { "event_id": uuid_bson(&event_id) }).await
    }

    #[instrument(skip(self))]
    async fn clear_thumbnail(&self, event_id: Uuid) -> ImageResult<u64> {
        let result = self
            .collection
            .update_many(
                doc! { "event_id": uuid_bson(&event_id), "is_thumbnail": true },
                doc! { "$set": { "is_thumbnail": false } },
            )
            .await?;
        Ok(result.modified_count)
    }
}
