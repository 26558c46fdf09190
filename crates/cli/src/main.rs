//! deploygate: dispatch a test definition to the deployer platform and
//! gate CI on the resulting deployment status.
//!
//! Exit code 0 when the deployment completes successfully, 1 on
//! deployment failure, timeout, or any setup error.  No flags, no
//! subcommands; configuration is environment-only.

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deploygate_cloud::queue::SqsQueue;
use deploygate_cloud::store::DynamoStatusStore;
use deploygate_core::config::Config;
use deploygate_core::poll::{poll_deployment, PollOutcome, PollPolicy};
use deploygate_dispatch::dispatcher;
use deploygate_dispatch::fetch::PayloadFetcher;

/// Number of status queries before giving up (50 minutes at 15s each).
const POLL_RETRIES: u32 = 200;

/// Fixed wait before every status query.
const POLL_WAIT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "deploygate=info,deploygate_core=info,deploygate_dispatch=info,deploygate_cloud=info"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(PollOutcome::Succeeded) => {
            tracing::info!("Deployment succeeded");
            ExitCode::SUCCESS
        }
        Ok(PollOutcome::Failed { message }) => {
            // GitHub Actions error annotation, picked up by the runner.
            eprintln!("::error:: Deployment failed: {message}");
            ExitCode::FAILURE
        }
        Ok(PollOutcome::TimedOut) => {
            tracing::error!(
                retries = POLL_RETRIES,
                wait_secs = POLL_WAIT.as_secs(),
                "Deployment did not complete within the retry budget"
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<PollOutcome> {
    let config = Config::from_env()?;

    let sdk_config = deploygate_cloud::aws::sdk_config(&config).await;
    let queue = SqsQueue::new(&sdk_config, config.queue_url.clone());
    let store = DynamoStatusStore::new(&sdk_config, config.status_table.clone());
    let fetcher = PayloadFetcher::new();

    let id = dispatcher::dispatch(&fetcher, &queue, &config.payload_url).await?;

    let policy = PollPolicy {
        retries: POLL_RETRIES,
        wait: POLL_WAIT,
    };
    Ok(poll_deployment(&store, &id, policy).await)
}
