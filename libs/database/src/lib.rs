//! Database connectivity for the event management services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health checks and index helpers
//! - `config` - `core_config::FromEnv` implementations for the config structs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
