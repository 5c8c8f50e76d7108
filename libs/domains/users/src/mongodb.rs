//! MongoDB implementations of UserRepository and RoleRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{datetime_bson, ensure_index, id_filter, is_duplicate_key_error};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::doc,
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};
use crate::repository::{RoleRepository, UserRepository};

pub const USERS_COLLECTION: &str = "users";
pub const ROLES_COLLECTION: &str = "roles";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> UserResult<()> {
        ensure_index(&self.collection, doc! { "email": 1 }, "users_email_unique", true).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key_error(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, email))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, token))]
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> UserResult<bool> {
        let result = self
            .collection
            .update_one(
                id_filter(id),
                doc! { "$set": {
                    "refresh_token": token,
                    "refresh_token_expiry": datetime_bson(&expires_at),
                    "updated_at": datetime_bson(&Utc::now()),
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }
}

pub struct MongoRoleRepository {
    collection: Collection<Role>,
}

impl MongoRoleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Role>(ROLES_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> UserResult<()> {
        ensure_index(&self.collection, doc! { "name": 1 }, "roles_name_unique", true).await?;
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for MongoRoleRepository {
    #[instrument(skip(self, role), fields(name = %role.name))]
    async fn create(&self, role: Role) -> UserResult<Role> {
        match self.collection.insert_one(&role).await {
            Ok(_) => Ok(role),
            Err(e) if is_duplicate_key_error(&e) => Err(UserError::DuplicateRole(role.name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<Role>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}
