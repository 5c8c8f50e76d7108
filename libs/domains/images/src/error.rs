use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Object storage error: {0}")]
    Storage(String),
}

pub type ImageResult<T> = Result<T, ImageError>;

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Validation(msg) => AppError::BadRequest(msg),
            ImageError::Database(msg) => AppError::Database(msg),
            ImageError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ImageError {
    fn from(err: mongodb::error::Error) -> Self {
        ImageError::Database(err.to_string())
    }
}
