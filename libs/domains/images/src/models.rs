use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An uploaded image attached to an event. `image_key` is the object key in
/// the bucket, not a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventImage {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub image_key: String,
    pub is_thumbnail: bool,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateEventImage {
    pub event_id: Uuid,
    #[validate(length(min = 1, max = 1024))]
    pub image_key: String,
    #[serde(default)]
    pub is_thumbnail: bool,
}

impl EventImage {
    pub fn new(input: CreateEventImage) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_id: input.event_id,
            image_key: input.image_key,
            is_thumbnail: input.is_thumbnail,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct PresignUploadRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 255))]
    pub content_type: String,
}

/// Object key and a time-limited URL for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrl {
    pub key: String,
    pub url: String,
}
