use std::env;

/// Process configuration for the relay and its remote store.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Target endpoint region
    pub region: String,

    /// Remote store credentials
    pub access_key_id: String,
    pub secret_key: String,

    /// Fixed target bucket
    pub bucket_name: String,

    /// Optional endpoint override for S3-compatible stores (forces path style)
    pub endpoint_url: Option<String>,

    /// Local staging directory (default: "uploads")
    pub staging_dir: String,

    /// HTTP listen port (default: 8000)
    pub listen_port: u16,

    /// Maximum upload size in bytes (default: 256 MB)
    pub max_upload_size: usize,

    /// When false, uploads to an existing key are rejected instead of
    /// last-writer-wins (default: true)
    pub allow_overwrite: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            access_key_id: String::new(),
            secret_key: String::new(),
            bucket_name: "object-relay".to_string(),
            endpoint_url: None,
            staging_dir: "uploads".to_string(),
            listen_port: 8000,
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            allow_overwrite: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            region: env::var("AWS_REGION").unwrap_or(default.region),

            access_key_id: env::var("AWS_ACCESS_KEY").unwrap_or(default.access_key_id),

            secret_key: env::var("AWS_SECRET_KEY").unwrap_or(default.secret_key),

            bucket_name: env::var("BUCKET_NAME").unwrap_or(default.bucket_name),

            endpoint_url: env::var("S3_ENDPOINT").ok(),

            staging_dir: env::var("STAGING_DIR").unwrap_or(default.staging_dir),

            listen_port: env::var("LISTEN_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.listen_port),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            allow_overwrite: env::var("ALLOW_OVERWRITE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(default.allow_overwrite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.bucket_name, "object-relay");
        assert_eq!(config.staging_dir, "uploads");
        assert_eq!(config.listen_port, 8000);
        assert_eq!(config.max_upload_size, 256 * 1024 * 1024);
        assert!(config.allow_overwrite);
        assert!(config.endpoint_url.is_none());
    }
}
