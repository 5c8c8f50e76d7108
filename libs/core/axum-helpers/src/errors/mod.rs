pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1010,
///   "error": "BUSINESS_RULE_VIOLATION",
///   "message": "Request rejected by business rules",
///   "details": ["duplicate event name"]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric code for logs and monitoring
    pub code: i32,
    /// Machine-readable identifier
    pub error: String,
    pub message: String,
    /// Field errors for validation failures, reasons for rule rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details,
        }
    }
}

/// Application error rendered as an [`ErrorResponse`].
///
/// Domain crates convert their own error enums into this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A domain rule refused the request; each entry is one reason.
    #[error("Rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status, code, client message and details for this error.
    ///
    /// Server-side failures never leak their internal message to the client.
    fn parts(&self) -> (StatusCode, ErrorCode, String, Option<Value>) {
        match self {
            AppError::SerdeJson(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::SerdeJsonError,
                ErrorCode::SerdeJsonError.default_message().to_string(),
                None,
            ),
            AppError::JsonExtractorRejection(e) => (
                e.status(),
                ErrorCode::JsonExtraction,
                e.body_text(),
                None,
            ),
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                serde_json::to_value(e).ok(),
            ),
            AppError::UuidError(_) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidUuid,
                ErrorCode::InvalidUuid.default_message().to_string(),
                None,
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                msg.clone(),
                None,
            ),
            AppError::Rejected(reasons) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BusinessRuleViolation,
                ErrorCode::BusinessRuleViolation.default_message().to_string(),
                Some(Value::from(reasons.clone())),
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                msg.clone(),
                None,
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone(), None)
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone(), None)
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                ErrorCode::DatabaseError.default_message().to_string(),
                None,
            ),
            AppError::Storage(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::ObjectStorageError,
                ErrorCode::ObjectStorageError.default_message().to_string(),
                None,
            ),
            AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                ErrorCode::InternalError.default_message().to_string(),
                None,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rejected_lists_reasons_in_details() {
        let (status, body) =
            body_of(AppError::Rejected(vec!["first".to_string(), "second".to_string()])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "BUSINESS_RULE_VIOLATION");
        assert_eq!(body.code, 1010);
        assert_eq!(body.details, Some(serde_json::json!(["first", "second"])));
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let (status, body) = body_of(AppError::NotFound("Event 42 not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Event 42 not found");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn test_database_error_hides_internal_message() {
        let (status, body) = body_of(AppError::Database("connection reset by peer".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("peer"));
    }

    #[tokio::test]
    async fn test_conflict_status() {
        let (status, body) = body_of(AppError::Conflict("duplicate".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, ErrorCode::Conflict.code());
    }

    #[test]
    fn test_rejected_display_joins_reasons() {
        let error = AppError::Rejected(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(error.to_string(), "Rejected: a; b");
    }
}
