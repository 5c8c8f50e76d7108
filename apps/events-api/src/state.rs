//! Shared application state, built once in `main` and handed to each
//! domain's router factory.

use axum_helpers::JwtAuth;
use domain_images::S3Storage;
use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares its connection pool across clones
    pub mongo_client: Client,
    pub db: Database,
    pub jwt: JwtAuth,
    pub storage: S3Storage,
}
