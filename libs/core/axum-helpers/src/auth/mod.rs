//! Stateless JWT authentication.
//!
//! Access tokens are HS256 JWTs checked for signature, issuer, audience and
//! expiry. Nothing is stored server-side; refresh tokens live with the user
//! record in the users domain.
//!
//! ```ignore
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/users", get(list_users))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
