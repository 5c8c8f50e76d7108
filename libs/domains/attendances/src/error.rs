use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("User {user_id} is not registered for event {event_id}")]
    NotRegistered { event_id: Uuid, user_id: Uuid },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: Uuid, user_id: Uuid },

    #[error("User {user_id} already checked in to event {event_id}")]
    AlreadyCheckedIn { event_id: Uuid, user_id: Uuid },

    #[error("Database error: {0}")]
    Database(String),
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;

impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::NotRegistered { .. } => AppError::NotFound(err.to_string()),
            AttendanceError::AlreadyRegistered { .. } | AttendanceError::AlreadyCheckedIn { .. } => {
                AppError::Conflict(err.to_string())
            }
            AttendanceError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for AttendanceError {
    fn from(err: mongodb::error::Error) -> Self {
        AttendanceError::Database(err.to_string())
    }
}
