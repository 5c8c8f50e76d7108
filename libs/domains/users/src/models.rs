use axum_helpers::JwtClaims;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Role given to every newly registered user
pub const DEFAULT_ROLE: &str = "User";

/// Stored user document. Holds secrets, so handlers only ever return
/// [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub user_name: String,
    /// Lowercased, unique
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub email_confirmed: bool,
    pub roles: Vec<String>,
    pub refresh_token: Option<String>,
    #[serde(default, with = "database::mongodb::bson_datetime::optional")]
    pub refresh_token_expiry: Option<DateTime<Utc>>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_name,
            email: normalize_email(&email),
            password_hash,
            phone_number: None,
            address: None,
            email_confirmed: false,
            roles: vec![DEFAULT_ROLE.to_string()],
            refresh_token: None,
            refresh_token_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `token` is this user's current, unexpired refresh token.
    pub fn refresh_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token, self.refresh_token_expiry) {
            (Some(stored), Some(expiry)) => stored == token && expiry > now,
            _ => false,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User as exposed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub email_confirmed: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            phone_number: user.phone_number,
            address: user.address,
            email_confirmed: user.email_confirmed,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub user_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    /// The (possibly expired) access token
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Access token plus the refresh token that can renew it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<String>,
    /// Unix seconds
    pub expires_at: i64,
}

impl From<JwtClaims> for SessionInfo {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.sub,
            user_name: claims.name,
            email: claims.email,
            roles: claims.roles,
            expires_at: claims.exp,
        }
    }
}
