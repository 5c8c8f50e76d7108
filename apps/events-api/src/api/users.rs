use axum::Router;
use domain_users::{
    AuthService, MongoRoleRepository, MongoUserRepository, RoleService, UserService,
    auth_handlers, handlers,
};
use mongodb::Database;

use crate::state::AppState;

pub fn auth_router(state: &AppState) -> Router {
    auth_handlers::auth_router(AuthService::new(
        MongoUserRepository::new(&state.db),
        state.jwt.clone(),
    ))
}

pub fn users_router(state: &AppState) -> Router {
    handlers::users_router(UserService::new(MongoUserRepository::new(&state.db)))
}

pub fn roles_router(state: &AppState) -> Router {
    handlers::roles_router(RoleService::new(MongoRoleRepository::new(&state.db)))
}

pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    MongoRoleRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create role indexes: {}", e))
}
