//! MongoDB implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{datetime_bson, ensure_index, is_duplicate_key_error, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{Attendance, AttendanceKey};
use crate::repository::AttendanceRepository;

pub const COLLECTION: &str = "attendances";

pub struct MongoAttendanceRepository {
    collection: Collection<Attendance>,
}

impl MongoAttendanceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Attendance>(COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AttendanceResult<()> {
        ensure_index(
            &self.collection,
            doc! { "event_id": 1, "user_id": 1 },
            "attendances_event_user_unique",
            true,
        )
        .await?;
        ensure_index(&self.collection, doc! { "user_id": 1 }, "attendances_user", false).await?;
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> AttendanceResult<Vec<Attendance>> {
        let options = FindOptions::builder()
            .sort(doc! { "attendance_time": 1 })
            .build();
        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}

fn key_filter(key: AttendanceKey) -> Document {
    doc! {
        "event_id": uuid_bson(&key.event_id),
        "user_id": uuid_bson(&key.user_id),
    }
}

#[async_trait]
impl AttendanceRepository for MongoAttendanceRepository {
    #[instrument(skip(self, attendance), fields(event_id = %attendance.event_id, user_id = %attendance.user_id))]
    async fn create(&self, attendance: Attendance) -> AttendanceResult<Attendance> {
        match self.collection.insert_one(&attendance).await {
            Ok(_) => Ok(attendance),
            Err(e) if is_duplicate_key_error(&e) => Err(AttendanceError::AlreadyRegistered {
                event_id: attendance.event_id,
                user_id: attendance.user_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn find(&self, key: AttendanceKey) -> AttendanceResult<Option<Attendance>> {
        Ok(self.collection.find_one(key_filter(key)).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> AttendanceResult<Vec<Attendance>> {
        self.find_many(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        self.find_many(doc! { "user_id": uuid_bson(&user_id) }).await
    }

    #[instrument(skip(self))]
    async fn list_by_event(&self, event_id: Uuid) -> AttendanceResult<Vec<Attendance>> {
        self.find_many(doc! { "event_id": uuid_bson(&event_id) }).await
    }

    #[instrument(skip(self))]
    async fn mark_checked_in(
        &self,
        key: AttendanceKey,
        at: DateTime<Utc>,
    ) -> AttendanceResult<Option<Attendance>> {
        let mut filter = key_filter(key);
        filter.insert("checked_in_at", doc! { "$exists": false });

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(filter, doc! { "$set": { "checked_in_at": datetime_bson(&at) } })
            .with_options(options)
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: AttendanceKey) -> AttendanceResult<bool> {
        let result = self.collection.delete_one(key_filter(key)).await?;
        Ok(result.deleted_count > 0)
    }
}
