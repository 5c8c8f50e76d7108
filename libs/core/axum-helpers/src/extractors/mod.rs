//! Extractors that turn malformed input into [`ErrorResponse`](crate::ErrorResponse) bodies.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
