use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{Role, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is taken
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// `email` must already be normalized
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace the stored refresh token. Returns false if the user is gone.
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> UserResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Fails with `DuplicateRole` when the name is taken
    async fn create(&self, role: Role) -> UserResult<Role>;

    async fn list(&self) -> UserResult<Vec<Role>>;
}
