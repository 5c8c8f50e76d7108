use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    /// The candidate broke one or more scheduling rules
    #[error("Event rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Event with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::Rejected(reasons) => AppError::Rejected(reasons),
            EventError::DuplicateName(name) => {
                AppError::Conflict(format!("Event with name '{}' already exists", name))
            }
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}
