//! Registration, login and token refresh.
//!
//! Access tokens are short-lived HS256 JWTs. Refresh tokens are opaque random
//! strings stored on the user document; each refresh rotates both.

use axum_helpers::JwtAuth;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{
    LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User, normalize_email,
};
use crate::password::{generate_refresh_token, hash_password, verify_password};
use crate::repository::UserRepository;

/// Lifetime of a refresh token
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 2;

pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.user_name.trim().to_string(), input.email, password_hash);

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<TokenResponse> {
        let email = normalize_email(&input.email);
        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login failed: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    /// Trade a stale access token and the matching refresh token for a new pair.
    #[instrument(skip(self, input))]
    pub async fn refresh(&self, input: RefreshRequest) -> UserResult<TokenResponse> {
        let claims = self
            .jwt
            .verify_token_ignoring_expiry(&input.token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh with unverifiable access token");
                UserError::InvalidRefreshToken
            })?;

        let user_id = claims.user_id().ok_or(UserError::InvalidRefreshToken)?;
        let user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(UserError::InvalidRefreshToken)?;

        if !user.refresh_token_valid(&input.refresh_token, Utc::now()) {
            return Err(UserError::InvalidRefreshToken);
        }

        let tokens = self.issue_tokens(&user).await?;
        tracing::info!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    async fn issue_tokens(&self, user: &User) -> UserResult<TokenResponse> {
        let token = self
            .jwt
            .create_access_token(&user.id.to_string(), &user.email, &user.user_name, &user.roles)
            .map_err(|e| UserError::Token(e.to_string()))?;

        let refresh_token = generate_refresh_token();
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
        if !self
            .repository
            .set_refresh_token(user.id, refresh_token.clone(), expires_at)
            .await?
        {
            return Err(UserError::NotFound(user.id));
        }

        Ok(TokenResponse {
            token,
            refresh_token,
        })
    }
}

impl<R: UserRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum_helpers::JwtConfig;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET))
    }

    fn stored_user(password: &str) -> User {
        User::new(
            "carol".into(),
            "carol@example.com".into(),
            hash_password(password).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_login_looks_up_normalized_email() {
        let user = stored_user("s3cret-pass");
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .withf(|email| email == "carol@example.com")
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_set_refresh_token().times(1).returning(|_, _, _| Ok(true));

        let service = AuthService::new(repo, jwt());
        let tokens = service
            .login(LoginRequest {
                email: " Carol@Example.com".into(),
                password: "s3cret-pass".into(),
            })
            .await
            .unwrap();

        let claims = jwt().verify_token(&tokens.token).unwrap();
        assert_eq!(claims.email, "carol@example.com");
        assert_eq!(claims.name, "carol");
    }

    #[tokio::test]
    async fn test_wrong_password_issues_nothing() {
        let user = stored_user("s3cret-pass");
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_set_refresh_token().never();

        let service = AuthService::new(repo, jwt());
        let err = service
            .login(LoginRequest {
                email: "carol@example.com".into(),
                password: "guess".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_expired_refresh_token_is_rejected() {
        let mut user = stored_user("s3cret-pass");
        user.refresh_token = Some("r".into());
        user.refresh_token_expiry = Some(Utc::now() - Duration::minutes(1));
        let token = jwt()
            .create_access_token(&user.id.to_string(), &user.email, &user.user_name, &user.roles)
            .unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_set_refresh_token().never();

        let service = AuthService::new(repo, jwt());
        let err = service
            .refresh(RefreshRequest {
                token,
                refresh_token: "r".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_with_forged_token_never_touches_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().never();

        let service = AuthService::new(repo, jwt());
        let err = service
            .refresh(RefreshRequest {
                token: "not.a.jwt".into(),
                refresh_token: "r".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidRefreshToken));
    }
}
