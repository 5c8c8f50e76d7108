//! Error codes carried in every error response.
//!
//! Each code has a client-facing identifier (`"NOT_FOUND"`), a numeric code for
//! logs and dashboards (`1004`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::BusinessRuleViolation;
//! assert_eq!(code.as_str(), "BUSINESS_RULE_VIOLATION");
//! assert_eq!(code.code(), 1010);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    InternalError,
    Unauthorized,
    Conflict,
    BadRequest,
    /// The request was well formed but a domain rule refused it
    BusinessRuleViolation,

    // Storage errors (2000-2999)
    DatabaseError,
    ObjectStorageError,

    // Serialization errors (5000-5999)
    SerdeJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ObjectStorageError => "OBJECT_STORAGE_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,
            Self::BusinessRuleViolation => 1010,
            Self::DatabaseError => 2001,
            Self::ObjectStorageError => 2101,
            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Unauthorized => "Authentication required",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::BusinessRuleViolation => "Request rejected by business rules",
            Self::DatabaseError => "A database error occurred",
            Self::ObjectStorageError => "Object storage request failed",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::BusinessRuleViolation.to_string(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_error_code_integer_ranges() {
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2001);
        assert_eq!(ErrorCode::SerdeJsonError.code(), 5001);
    }

    #[test]
    fn test_error_code_serialization_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::ObjectStorageError).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorCode::ObjectStorageError.as_str()));

        let code: ErrorCode = serde_json::from_str("\"CONFLICT\"").unwrap();
        assert_eq!(code, ErrorCode::Conflict);
    }
}
