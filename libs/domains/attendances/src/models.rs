use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A user's registration for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    /// When the registration was made
    #[serde(with = "database::mongodb::bson_datetime")]
    pub attendance_time: DateTime<Utc>,
    /// Set once the attendee shows up
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "database::mongodb::bson_datetime::optional"
    )]
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Identifies one registration. Used as a body for register/check-in and as
/// query parameters for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct AttendanceKey {
    pub event_id: Uuid,
    pub user_id: Uuid,
}

impl Attendance {
    pub fn new(key: AttendanceKey) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_id: key.event_id,
            user_id: key.user_id,
            attendance_time: Utc::now(),
            checked_in_at: None,
        }
    }

    pub fn key(&self) -> AttendanceKey {
        AttendanceKey {
            event_id: self.event_id,
            user_id: self.user_id,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        self.checked_in_at.is_some()
    }
}
