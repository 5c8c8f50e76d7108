use axum::Router;
use domain_events::{EventService, MongoEventRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.db.clone());
    handlers::router(EventService::new(repository))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoEventRepository::new(db.clone())
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))
}
