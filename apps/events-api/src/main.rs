use axum_helpers::JwtAuth;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_images::S3Storage;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB");
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(database = %config.mongodb.database(), "Connected to MongoDB");

    api::init_indexes(&db).await?;

    let storage = S3Storage::from_config(&config.s3).await;
    let jwt = JwtAuth::new(&config.jwt);

    let state = AppState {
        config,
        mongo_client,
        db,
        jwt,
        storage,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting event management API"
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: releasing MongoDB connection pool");
        // The pool closes once the last client handle is dropped
        drop(state);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Event management API shutdown complete");
    Ok(())
}
