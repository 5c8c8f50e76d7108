use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or, env_required};

/// Lifetime of presigned URLs when not configured.
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 600;

/// Object storage settings.
///
/// Environment variables:
/// - `S3_BUCKET_NAME` (required)
/// - `AWS_S3_REGION` or `AWS_REGION` (optional, SDK default chain otherwise)
/// - `S3_ENDPOINT_URL` (optional, for MinIO or LocalStack)
/// - `S3_PRESIGN_EXPIRY_SECS` (default 600)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub presign_expiry_secs: u64,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: None,
            endpoint_url: None,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
        }
    }
}

impl FromEnv for S3Config {
    fn from_env() -> Result<Self, ConfigError> {
        let bucket = env_required("S3_BUCKET_NAME")?;
        if bucket.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "S3_BUCKET_NAME".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            bucket,
            region: env_first_of(&["AWS_S3_REGION", "AWS_REGION"]),
            endpoint_url: env_first_of(&["S3_ENDPOINT_URL"]),
            presign_expiry_secs: env_parse_or("S3_PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS)?,
        })
    }
}
