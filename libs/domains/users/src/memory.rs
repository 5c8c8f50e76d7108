use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};
use crate::repository::{RoleRepository, UserRepository};

/// In-memory UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> UserResult<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };

        user.refresh_token = Some(token);
        user.refresh_token_expiry = Some(expires_at);
        user.updated_at = Utc::now();
        Ok(true)
    }
}

/// In-memory RoleRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<Vec<Role>>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, role: Role) -> UserResult<Role> {
        let mut roles = self.roles.write().await;
        if roles.iter().any(|r| r.name == role.name) {
            return Err(UserError::DuplicateRole(role.name));
        }
        roles.push(role.clone());
        Ok(role)
    }

    async fn list(&self) -> UserResult<Vec<Role>> {
        let mut roles = self.roles.read().await.clone();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}
