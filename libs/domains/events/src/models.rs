use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::geo::GeoPoint;

/// Venue used when a request does not name one
pub const DEFAULT_ADDRESS: &str = "54 Nguyễn Lương Bằng";

/// Event entity - stored in the `events` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Unique across all events (case-sensitive)
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Organizing user
    pub host_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "database::mongodb::bson_datetime::optional"
    )]
    pub start_checkin: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "database::mongodb::bson_datetime::optional"
    )]
    pub end_checkin: Option<DateTime<Utc>>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for proposing a new event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    /// Defaults to the main venue when omitted
    #[serde(default)]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub host_id: Uuid,
    #[serde(default)]
    pub status_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub start_checkin: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_checkin: Option<DateTime<Utc>>,
}

/// DTO for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub host_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_checkin: Option<DateTime<Utc>>,
    pub end_checkin: Option<DateTime<Utc>>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Query parameters for listing events
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Validate)]
pub struct EventFilter {
    pub host_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Events starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Events starting at or before this instant
    pub to: Option<DateTime<Utc>>,
    /// Page size, at least 1
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            host_id: None,
            status_id: None,
            category_id: None,
            from: None,
            to: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Result of a dry-run conflict check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConflictReport {
    pub accepted: bool,
    pub violations: Vec<String>,
}

impl Event {
    pub fn new(input: CreateEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            address: input
                .address
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            latitude: input.latitude,
            longitude: input.longitude,
            host_id: input.host_id,
            status_id: input.status_id,
            category_id: input.category_id,
            start_time: input.start_time,
            end_time: input.end_time,
            start_checkin: input.start_checkin,
            end_checkin: input.end_checkin,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(latitude) = update.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            self.longitude = longitude;
        }
        if let Some(host_id) = update.host_id {
            self.host_id = host_id;
        }
        if update.status_id.is_some() {
            self.status_id = update.status_id;
        }
        if update.category_id.is_some() {
            self.category_id = update.category_id;
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if update.start_checkin.is_some() {
            self.start_checkin = update.start_checkin;
        }
        if update.end_checkin.is_some() {
            self.end_checkin = update.end_checkin;
        }
        self.updated_at = Utc::now();
    }

    /// Whether the event would be returned for `filter`, ignoring pagination.
    pub fn matches(&self, filter: &EventFilter) -> bool {
        filter.host_id.is_none_or(|id| self.host_id == id)
            && filter.status_id.is_none_or(|id| self.status_id == Some(id))
            && filter.category_id.is_none_or(|id| self.category_id == Some(id))
            && filter.from.is_none_or(|from| self.start_time >= from)
            && filter.to.is_none_or(|to| self.start_time <= to)
    }
}

#[cfg(test)]
impl Event {
    pub(crate) fn test_fixture(name: &str, host_id: Uuid) -> Self {
        let start = Utc::now();
        Self::new(CreateEvent {
            name: name.to_string(),
            description: String::new(),
            address: None,
            latitude: 16.0544,
            longitude: 108.2022,
            host_id,
            status_id: None,
            category_id: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(2),
            start_checkin: None,
            end_checkin: None,
        })
    }
}
