//! MongoDB connection management and shared collection helpers.

pub mod bson_datetime;
mod config;
mod connector;
mod health;
mod helpers;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry, ping};
pub use health::{HealthStatus, check_health_detailed};
pub use helpers::{datetime_bson, ensure_index, id_filter, is_duplicate_key_error, uuid_bson};

pub use mongodb::{Client, Collection, Database};
