use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime in seconds (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

impl JwtClaims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    access_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(issuer = %config.issuer, "JWT auth initialized");
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_secs: config.access_ttl_secs,
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    pub fn create_access_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_ttl_secs)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Signature, issuer, audience and expiry must all check out.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation(true))?;
        Ok(data.claims)
    }

    /// Like [`verify_token`](Self::verify_token) but accepts expired tokens.
    ///
    /// Used by the refresh flow, where the access token is expected to be stale.
    pub fn verify_token_ignoring_expiry(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation(false))?;
        Ok(data.claims)
    }

    fn validation(&self, validate_exp: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = validate_exp;
        validation.leeway = 0;
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!"))
    }

    #[test]
    fn test_issued_token_verifies() {
        let auth = auth();
        let id = Uuid::now_v7().to_string();
        let token = auth
            .create_access_token(&id, "a@b.c", "alice", &["Admin".to_string()])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.roles, vec!["Admin".to_string()]);
        assert_eq!(claims.iss, "event-management");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
        assert!(claims.user_id().is_some());
    }

    #[test]
    fn test_expired_token_only_passes_lenient_check() {
        let config = JwtConfig::new("this-is-a-valid-secret-with-32-chars!").with_access_ttl_secs(-120);
        let auth = JwtAuth::new(&config);
        let token = auth.create_access_token("u", "a@b.c", "alice", &[]).unwrap();

        assert!(auth.verify_token(&token).is_err());
        assert_eq!(auth.verify_token_ignoring_expiry(&token).unwrap().sub, "u");
    }

    #[test]
    fn test_foreign_audience_is_rejected() {
        let other = JwtAuth::new(
            &JwtConfig::new("this-is-a-valid-secret-with-32-chars!").with_audience("someone-else"),
        );
        let token = other.create_access_token("u", "a@b.c", "alice", &[]).unwrap();

        assert!(auth().verify_token(&token).is_err());
        assert!(auth().verify_token_ignoring_expiry(&token).is_err());
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let other = JwtAuth::new(
            &JwtConfig::new("this-is-a-valid-secret-with-32-chars!").with_issuer("elsewhere"),
        );
        let token = other.create_access_token("u", "a@b.c", "alice", &[]).unwrap();
        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars-long!!"));
        let token = other.create_access_token("u", "a@b.c", "alice", &[]).unwrap();
        assert!(auth().verify_token(&token).is_err());
    }
}
