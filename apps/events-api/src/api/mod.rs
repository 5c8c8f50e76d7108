//! Every HTTP route of the service.
//! Nested under /api by axum_helpers::create_router.

pub mod attendances;
pub mod catalog;
pub mod events;
pub mod health;
pub mod images;
pub mod users;

use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    let protected = Router::new()
        .nest("/users", users::users_router(state))
        .nest("/roles", users::roles_router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .nest("/events", events::router(state))
        .nest("/categories", catalog::categories_router(state))
        .nest("/statuses", catalog::statuses_router(state))
        .nest("/attendances", attendances::router(state))
        .nest("/event-images", images::event_images_router(state))
        .nest("/images", images::images_router(state))
        .nest("/auth", users::auth_router(state))
        .merge(protected)
        .merge(health::router(state.clone()))
}

/// Create the unique and lookup indexes of every collection.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    events::init_indexes(db).await?;
    catalog::init_indexes(db).await?;
    attendances::init_indexes(db).await?;
    images::init_indexes(db).await?;
    users::init_indexes(db).await?;
    info!("Collection indexes ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{JwtAuth, JwtConfig};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use domain_images::{S3Config, S3Storage};
    use tower::ServiceExt;

    /// Client construction is lazy, so no MongoDB or S3 is contacted here.
    async fn state() -> AppState {
        let mongodb = MongoConfig::with_database("mongodb://localhost:27017", "events_api_test");
        let mongo_client = mongodb::Client::with_uri_str(mongodb.url()).await.unwrap();
        let db = mongo_client.database(mongodb.database());
        let jwt_config = JwtConfig::new("this-is-a-valid-secret-with-32-chars!");

        let s3_conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .build();

        AppState {
            jwt: JwtAuth::new(&jwt_config),
            storage: S3Storage::new(aws_sdk_s3::Client::from_conf(s3_conf), "event-images"),
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                mongodb,
                jwt: jwt_config,
                s3: S3Config::new("event-images"),
                environment: Environment::Development,
            },
            mongo_client,
            db,
        }
    }

    #[tokio::test]
    async fn test_users_and_roles_need_a_token() {
        let app = routes(&state().await);

        for uri in ["/users", "/roles"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_validate_needs_a_token() {
        let response = routes(&state().await)
            .oneshot(
                Request::builder()
                    .uri("/auth/validate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_event_validation_runs_before_storage() {
        let response = routes(&state().await)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/events")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
