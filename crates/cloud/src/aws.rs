//! Shared AWS SDK configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;

use deploygate_core::config::Config;

/// Build the shared SDK config from the resolved environment config.
///
/// Credentials are the static key pair from the environment; no profile
/// or instance-metadata resolution happens.
pub async fn sdk_config(config: &Config) -> SdkConfig {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "deploygate-env",
    );

    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .load()
        .await
}
