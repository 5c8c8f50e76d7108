use axum::Router;
use domain_images::{EventImageService, ImageStorageService, MongoEventImageRepository, handlers};
use mongodb::Database;
use std::time::Duration;

use crate::state::AppState;

pub fn event_images_router(state: &AppState) -> Router {
    handlers::event_images_router(EventImageService::new(MongoEventImageRepository::new(
        &state.db,
    )))
}

pub fn images_router(state: &AppState) -> Router {
    let expires_in = Duration::from_secs(state.config.s3.presign_expiry_secs);
    handlers::images_router(ImageStorageService::new(state.storage.clone(), expires_in))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoEventImageRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event image indexes: {}", e))
}
