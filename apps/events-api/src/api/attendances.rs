use axum::Router;
use domain_attendances::{AttendanceService, MongoAttendanceRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(AttendanceService::new(MongoAttendanceRepository::new(&state.db)))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoAttendanceRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create attendance indexes: {}", e))
}
