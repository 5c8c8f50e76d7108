use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateRole, Role, UserResponse};
use crate::repository::{RoleRepository, UserRepository};
use crate::service::{RoleService, UserService};

#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, get_user_roles),
    components(
        schemas(UserResponse),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User accounts (bearer token required)")
    )
)]
pub struct UsersApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(list_roles, create_role),
    components(
        schemas(Role, CreateRole),
        responses(BadRequestValidationResponse, ConflictResponse, UnauthorizedResponse)
    ),
    tags(
        (name = "Roles", description = "Role catalog (bearer token required)")
    )
)]
pub struct RolesApiDoc;

/// Carries no auth layer of its own; mount behind `jwt_auth_middleware`.
pub fn users_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user))
        .route("/{id}/roles", get(get_user_roles))
        .with_state(Arc::new(service))
}

/// Carries no auth layer of its own; mount behind `jwt_auth_middleware`.
pub fn roles_router<R: RoleRepository + 'static>(service: RoleService<R>) -> Router {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .with_state(Arc::new(service))
}

/// List users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    Ok(Json(service.list_users().await?))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get_user(id).await?))
}

/// Role names of a user
#[utoipa::path(
    get,
    path = "/{id}/roles",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Role names", body = Vec<String>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user_roles<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<Vec<String>>> {
    Ok(Json(service.get_user_roles(id).await?))
}

/// List roles
#[utoipa::path(
    get,
    path = "",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All roles", body = Vec<Role>),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn list_roles<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
) -> UserResult<Json<Vec<Role>>> {
    Ok(Json(service.list_roles().await?))
}

/// Create a role
#[utoipa::path(
    post,
    path = "",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateRole>,
) -> UserResult<impl IntoResponse> {
    let role = service.create_role(input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}
