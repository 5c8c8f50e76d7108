use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

use super::jwt::ACCESS_TOKEN_TTL;

const MIN_SECRET_LEN: usize = 32;

/// JWT signing settings.
///
/// Environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ISSUER` (default `event-management`)
/// - `JWT_AUDIENCE` (default `event-management-clients`)
/// - `JWT_ACCESS_TTL_SECS` (default 900)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_secs: i64,
}

impl JwtConfig {
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: "event-management".to_string(),
            audience: "event-management-clients".to_string(),
            access_ttl_secs: ACCESS_TOKEN_TTL,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_access_ttl_secs(mut self, secs: i64) -> Self {
        self.access_ttl_secs = secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", "event-management"),
            audience: env_or_default("JWT_AUDIENCE", "event-management-clients"),
            access_ttl_secs: env_parse_or("JWT_ACCESS_TTL_SECS", ACCESS_TOKEN_TTL)?,
        })
    }
}
