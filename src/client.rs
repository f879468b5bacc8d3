use aws_config::{Region, SdkConfig};
use aws_sdk_comprehend::Client as ComprehendClient;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use crate::config::AwsConfig;

// Short-lived clients, built fresh per call site. Auth, transport, retries
// and region routing all live in the SDK.

pub async fn secrets_manager_client(config: &AwsConfig) -> SecretsManagerClient {
    let shared = load_sdk_config(config).await;
    let mut builder = aws_sdk_secretsmanager::config::Builder::from(&shared);
    if let Some(endpoint) = config.endpoint_url.as_deref() {
        builder = builder.endpoint_url(endpoint);
    }
    SecretsManagerClient::from_conf(builder.build())
}

pub async fn comprehend_client(config: &AwsConfig) -> ComprehendClient {
    let shared = load_sdk_config(config).await;
    let mut builder = aws_sdk_comprehend::config::Builder::from(&shared);
    if let Some(endpoint) = config.endpoint_url.as_deref() {
        builder = builder.endpoint_url(endpoint);
    }
    ComprehendClient::from_conf(builder.build())
}

async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .load()
        .await
}
