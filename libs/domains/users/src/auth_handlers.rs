use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    JwtClaims, ValidatedJson, jwt_auth_middleware,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth::AuthService;
use crate::error::UserResult;
use crate::models::{
    LoginRequest, MessageResponse, RefreshRequest, RegisterRequest, SessionInfo, TokenResponse,
};
use crate::repository::UserRepository;

#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh, validate),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            TokenResponse,
            MessageResponse,
            SessionInfo
        ),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and token refresh")
    )
)]
pub struct AuthApiDoc;

/// `/validate` is protected by the service's own [`JwtAuth`](axum_helpers::JwtAuth);
/// the other routes are public.
pub fn auth_router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    let jwt = service.jwt().clone();

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route(
            "/validate",
            get(validate).route_layer(middleware::from_fn_with_state(jwt, jwt_auth_middleware)),
        )
        .with_state(Arc::new(service))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Exchange credentials for tokens
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<TokenResponse>> {
    Ok(Json(service.login(input).await?))
}

/// Rotate the token pair
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "Auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn refresh<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> UserResult<Json<TokenResponse>> {
    Ok(Json(service.refresh(input).await?))
}

/// Identity behind the presented access token
#[utoipa::path(
    get,
    path = "/validate",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = SessionInfo),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn validate(Extension(claims): Extension<JwtClaims>) -> Json<SessionInfo> {
    Json(SessionInfo::from(claims))
}
