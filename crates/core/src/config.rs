//! Environment-driven configuration.
//!
//! Every variable is required; there are no defaults.  The variable names
//! are fixed by the deployer platform's CI contract.

/// Region the deployer platform's queue and status table live in.
pub const ENV_AWS_REGION: &str = "DEPLOYER_PLATFORM_AWS_REGION";
/// URL of the SQS dispatch queue.
pub const ENV_SQS_URL: &str = "DEPLOYER_PLATFORM_SQS_URL";
/// Name of the DynamoDB status table.
pub const ENV_DYNAMO_TABLE: &str = "DEPLOYER_PLATFORM_DYNAMO_TABLE";
/// Static AWS access key id.
pub const ENV_AWS_ACCESS_KEY_ID: &str = "DEPLOYER_PLATFORM_AWS_ACCESS_KEY_ID";
/// Static AWS secret access key.
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "DEPLOYER_PLATFORM_AWS_SECRET_ACCESS_KEY";
/// URL the test-definition payload is fetched from.
pub const ENV_TEST_DEFINITION_URL: &str = "TEST_DEFINITION_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub queue_url: String,
    pub status_table: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub payload_url: String,
}

impl Config {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary lookup function.
    ///
    /// Tests use this instead of mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            aws_region: require(ENV_AWS_REGION)?,
            queue_url: require(ENV_SQS_URL)?,
            status_table: require(ENV_DYNAMO_TABLE)?,
            access_key_id: require(ENV_AWS_ACCESS_KEY_ID)?,
            secret_access_key: require(ENV_AWS_SECRET_ACCESS_KEY)?,
            payload_url: require(ENV_TEST_DEFINITION_URL)?,
        })
    }
}
