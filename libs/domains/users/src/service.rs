use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateRole, Role, UserResponse};
use crate::repository::{RoleRepository, UserRepository};

/// Read access to user accounts
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_user_roles(&self, id: Uuid) -> UserResult<Vec<String>> {
        Ok(self.get_user(id).await?.roles)
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

pub struct RoleService<R: RoleRepository> {
    repository: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_role(&self, input: CreateRole) -> UserResult<Role> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(UserError::Validation("role name must not be blank".to_string()));
        }

        let role = self.repository.create(Role::new(name)).await?;
        tracing::info!(role_id = %role.id, "Role created");
        Ok(role)
    }

    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> UserResult<Vec<Role>> {
        self.repository.list().await
    }
}

impl<R: RoleRepository> Clone for RoleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
