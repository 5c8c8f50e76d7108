//! Images Domain
//!
//! Two halves that share a bucket: `event_images` records which object keys
//! belong to which event (one of them may be the thumbnail), and the
//! [`ObjectStorage`] seam hands out presigned URLs so clients move the bytes
//! to and from S3 themselves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod s3;
pub mod service;
pub mod storage;

pub use config::S3Config;
pub use error::{ImageError, ImageResult};
pub use handlers::{EventImagesApiDoc, ImagesApiDoc};
pub use memory::InMemoryEventImageRepository;
pub use models::{CreateEventImage, EventImage, PresignUploadRequest, PresignedUrl};
pub use mongodb::MongoEventImageRepository;
pub use repository::EventImageRepository;
pub use s3::S3Storage;
pub use service::{EventImageService, ImageStorageService};
pub use storage::ObjectStorage;
