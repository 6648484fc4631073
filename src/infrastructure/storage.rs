use crate::config::AppConfig;
use crate::services::store::S3ObjectStore;
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::info;

/// Builds the S3 client from the injected configuration. Credentials,
/// region and bucket are fixed at startup; nothing is read from ambient
/// process state here.
pub async fn setup_storage(config: &AppConfig) -> Arc<S3ObjectStore> {
    info!(
        "☁️  S3 storage: bucket {} ({})",
        config.bucket_name, config.region
    );

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(Credentials::new(
            config.access_key_id.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        ));
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    if config.endpoint_url.is_some() {
        // MinIO and friends serve buckets under the path, not a subdomain
        builder = builder.force_path_style(true);
    }
    let client = aws_sdk_s3::Client::from_conf(builder.build());

    Arc::new(S3ObjectStore::new(client, config.bucket_name.clone()))
}
