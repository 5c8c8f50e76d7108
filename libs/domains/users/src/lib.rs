//! Users Domain
//!
//! Accounts, roles and the token flow:
//!
//! ```text
//! register ──► login ──► { token, refresh_token }
//!                            │
//!              access token expires
//!                            │
//!                 refresh ◄──┘  (rotates both)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{AuthService, InMemoryUserRepository, auth_handlers};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!"));
//! let service = AuthService::new(InMemoryUserRepository::new(), jwt);
//! let router = auth_handlers::auth_router(service);
//! ```

pub mod auth;
pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use auth::AuthService;
pub use auth_handlers::AuthApiDoc;
pub use error::{UserError, UserResult};
pub use handlers::{RolesApiDoc, UsersApiDoc};
pub use memory::{InMemoryRoleRepository, InMemoryUserRepository};
pub use models::{
    CreateRole, LoginRequest, RefreshRequest, RegisterRequest, Role, SessionInfo, TokenResponse,
    User, UserResponse,
};
pub use mongodb::{MongoRoleRepository, MongoUserRepository};
pub use repository::{RoleRepository, UserRepository};
pub use service::{RoleService, UserService};
