use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_images::S3Config;

pub use core_config::Environment;

/// Everything the binary reads from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub s3: S3Config,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            s3: S3Config::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 4] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("JWT_SECRET", Some("this-is-a-valid-secret-with-32-chars!")),
        ("S3_BUCKET_NAME", Some("event-images")),
        ("APP_ENV", Some("production")),
    ];

    #[test]
    fn test_config_composes_all_sections() {
        temp_env::with_vars(REQUIRED, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "events_api");
            assert_eq!(config.s3.bucket, "event-images");
            assert_eq!(config.server.port, 8080);
            assert!(config.environment.is_production());
        });
    }

    #[test]
    fn test_short_jwt_secret_fails_startup() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("JWT_SECRET", Some("too-short")),
                ("S3_BUCKET_NAME", Some("event-images")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );
    }
}
