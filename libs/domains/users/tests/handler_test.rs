//! Handler tests for auth, users and roles

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Router, middleware};
use axum_helpers::{JwtAuth, JwtConfig, jwt_auth_middleware};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET))
}

fn auth_app(repo: InMemoryUserRepository) -> Router {
    auth_handlers::auth_router(AuthService::new(repo, jwt()))
}

fn protected_users_app(repo: InMemoryUserRepository) -> Router {
    handlers::users_router(UserService::new(repo))
        .layer(middleware::from_fn_with_state(jwt(), jwt_auth_middleware))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn register_and_login(repo: &InMemoryUserRepository) -> TokenResponse {
    let response = auth_app(repo.clone())
        .oneshot(post_json(
            "/register",
            json!({ "user_name": "dana", "email": "dana@example.com", "password": "long-enough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = auth_app(repo.clone())
        .oneshot(post_json(
            "/login",
            json!({ "email": "dana@example.com", "password": "long-enough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_register_login_validate() {
    let repo = InMemoryUserRepository::new();
    let tokens = register_and_login(&repo).await;
    assert!(!tokens.refresh_token.is_empty());

    let response = auth_app(repo)
        .oneshot(get_with_token("/validate", &tokens.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session: SessionInfo = json_body(response.into_body()).await;
    assert_eq!(session.email, "dana@example.com");
    assert_eq!(session.roles, vec!["User".to_string()]);
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let repo = InMemoryUserRepository::new();
    register_and_login(&repo).await;

    let response = auth_app(repo)
        .oneshot(post_json(
            "/register",
            json!({ "user_name": "dana2", "email": "DANA@example.com", "password": "long-enough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_short_password_fails_validation() {
    let response = auth_app(InMemoryUserRepository::new())
        .oneshot(post_json(
            "/register",
            json!({ "user_name": "eve", "email": "eve@example.com", "password": "short" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let repo = InMemoryUserRepository::new();
    register_and_login(&repo).await;

    let response = auth_app(repo)
        .oneshot(post_json(
            "/login",
            json!({ "email": "dana@example.com", "password": "not-the-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_refresh_rotates_tokens_once() {
    let repo = InMemoryUserRepository::new();
    let tokens = register_and_login(&repo).await;
    let refresh_body = json!({ "token": tokens.token, "refresh_token": tokens.refresh_token });

    let response = auth_app(repo.clone())
        .oneshot(post_json("/refresh", refresh_body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rotated: TokenResponse = json_body(response.into_body()).await;
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // The old refresh token was replaced
    let response = auth_app(repo)
        .oneshot(post_json("/refresh", refresh_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_require_token() {
    let repo = InMemoryUserRepository::new();
    let response = protected_users_app(repo)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_lookup_hides_secrets() {
    let repo = InMemoryUserRepository::new();
    let tokens = register_and_login(&repo).await;
    let user_id = jwt().verify_token(&tokens.token).unwrap().sub;

    let response = protected_users_app(repo.clone())
        .oneshot(get_with_token(&format!("/{user_id}"), &tokens.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["user_name"], "dana");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("refresh_token").is_none());

    let response = protected_users_app(repo)
        .oneshot(get_with_token(&format!("/{user_id}/roles"), &tokens.token))
        .await
        .unwrap();
    let roles: Vec<String> = json_body(response.into_body()).await;
    assert_eq!(roles, vec!["User".to_string()]);
}

#[tokio::test]
async fn test_duplicate_role_is_conflict() {
    let repo = InMemoryRoleRepository::new();
    let roles_app = || handlers::roles_router(RoleService::new(repo.clone()));

    let response = roles_app()
        .oneshot(post_json("/", json!({ "name": "Admin" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = roles_app()
        .oneshot(post_json("/", json!({ "name": "Admin" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = roles_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let roles: Vec<Role> = json_body(response.into_body()).await;
    assert_eq!(roles.len(), 1);
}
