//! Fixed-interval polling of the deployment status table.
//!
//! Each attempt sleeps for the full wait interval, then queries the
//! store.  Query errors consume an attempt and the loop carries on; only
//! a terminal record or an exhausted budget ends the run.

use std::time::Duration;

use crate::record::MessageId;
use crate::store::StatusStore;

/// Retry budget and wait interval for one poll run.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Number of sleep-then-query attempts before giving up.
    pub retries: u32,
    /// Wait before every query, including the first.
    pub wait: Duration,
}

/// Result of a poll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A terminal record with a non-failure status was observed.
    Succeeded,
    /// A terminal record carried the failure status.
    Failed {
        /// Diagnostic message from the failing record.
        message: String,
    },
    /// The retry budget ran out with no terminal record.
    TimedOut,
}

/// Poll the status store until a terminal record appears or the retry
/// budget is exhausted.
///
/// Only the first completed record in a response is acted upon; the
/// store returns records newest first, so that is the latest terminal
/// state.  With `retries = 0` the store is never queried and the run
/// times out immediately.
pub async fn poll_deployment(
    store: &dyn StatusStore,
    id: &MessageId,
    policy: PollPolicy,
) -> PollOutcome {
    for attempt in 1..=policy.retries {
        tracing::info!(
            attempt,
            wait_secs = policy.wait.as_secs(),
            "Deployment pending, sleeping before next status query"
        );
        tokio::time::sleep(policy.wait).await;

        let records = match store.completed_records(id).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, attempt, "Error querying status table, will retry");
                continue;
            }
        };
        tracing::info!(items = records.len(), "Query succeeded");

        if let Some(record) = records.into_iter().find(|r| r.completed) {
            tracing::info!(
                id = %record.id,
                status = %record.status,
                message = %record.message,
                "Deployment completed"
            );
            if record.is_failed() {
                return PollOutcome::Failed {
                    message: record.message,
                };
            }
            return PollOutcome::Succeeded;
        }
    }

    PollOutcome::TimedOut
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::record::DeploymentStatusRecord;
    use crate::store::StoreError;

    /// Store that replays a fixed script of query results and counts
    /// how many times it was asked.
    struct ScriptedStore {
        script: Mutex<VecDeque<Result<Vec<DeploymentStatusRecord>, StoreError>>>,
        calls: AtomicU32,
    }

    impl ScriptedStore {
        fn new(
            script: impl IntoIterator<Item = Result<Vec<DeploymentStatusRecord>, StoreError>>,
        ) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusStore for ScriptedStore {
        async fn completed_records(
            &self,
            _id: &MessageId,
        ) -> Result<Vec<DeploymentStatusRecord>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn record(completed: bool, status: &str, message: &str) -> DeploymentStatusRecord {
        DeploymentStatusRecord {
            id: "m-1".into(),
            completed,
            status: status.into(),
            message: message.into(),
        }
    }

    fn policy(retries: u32) -> PollPolicy {
        PollPolicy {
            retries,
            wait: Duration::ZERO,
        }
    }

    fn id() -> MessageId {
        MessageId::new("m-1")
    }

    #[tokio::test]
    async fn empty_results_exhaust_the_full_budget() {
        let store = ScriptedStore::new([Ok(Vec::new()), Ok(Vec::new()), Ok(Vec::new())]);

        let outcome = poll_deployment(&store, &id(), policy(3)).await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn zero_retries_times_out_without_querying() {
        let store = ScriptedStore::new([]);

        let outcome = poll_deployment(&store, &id(), policy(0)).await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn terminal_success_ends_after_one_attempt() {
        let store = ScriptedStore::new([Ok(vec![record(true, "DEPLOYED", "done")])]);

        let outcome = poll_deployment(&store, &id(), policy(200)).await;

        assert_eq!(outcome, PollOutcome::Succeeded);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn failure_sentinel_ends_immediately_with_diagnostic() {
        let store = ScriptedStore::new([Ok(vec![record(true, "FAILED", "bad manifest")])]);

        let outcome = poll_deployment(&store, &id(), policy(200)).await;

        assert_matches!(outcome, PollOutcome::Failed { message } if message == "bad manifest");
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn query_errors_consume_attempts_without_aborting() {
        let store = ScriptedStore::new([
            Err(StoreError::Query("throttled".into())),
            Ok(vec![record(true, "OK", "done")]),
        ]);

        let outcome = poll_deployment(&store, &id(), policy(5)).await;

        assert_eq!(outcome, PollOutcome::Succeeded);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn persistent_errors_run_the_budget_to_exhaustion() {
        let store = ScriptedStore::new([
            Err(StoreError::Query("throttled".into())),
            Err(StoreError::Query("throttled".into())),
            Err(StoreError::Query("throttled".into())),
            Err(StoreError::Query("throttled".into())),
        ]);

        let outcome = poll_deployment(&store, &id(), policy(4)).await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(store.calls(), 4);
    }

    #[tokio::test]
    async fn non_terminal_records_are_skipped() {
        let store = ScriptedStore::new([
            Ok(vec![record(false, "IN_PROGRESS", "rolling out")]),
            Ok(vec![record(true, "DEPLOYED", "done")]),
        ]);

        let outcome = poll_deployment(&store, &id(), policy(5)).await;

        assert_eq!(outcome, PollOutcome::Succeeded);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn only_first_terminal_record_in_a_response_counts() {
        // Newest-first ordering: the later FAILED record wins over the
        // older success.
        let store = ScriptedStore::new([Ok(vec![
            record(true, "FAILED", "rollback"),
            record(true, "DEPLOYED", "stale success"),
        ])]);

        let outcome = poll_deployment(&store, &id(), policy(5)).await;

        assert_matches!(outcome, PollOutcome::Failed { message } if message == "rollback");
        assert_eq!(store.calls(), 1);
    }
}
