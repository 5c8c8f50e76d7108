use axum::Router;
use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn categories_router(state: &AppState) -> Router {
    handlers::router(CatalogService::new(MongoCatalogRepository::categories(&state.db)))
}

pub fn statuses_router(state: &AppState) -> Router {
    handlers::router(CatalogService::new(MongoCatalogRepository::statuses(&state.db)))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    for repository in [
        MongoCatalogRepository::categories(db),
        MongoCatalogRepository::statuses(db),
    ] {
        repository
            .create_indexes()
            .await
            .map_err(|e| eyre::eyre!("Failed to create catalog indexes: {}", e))?;
    }
    Ok(())
}
