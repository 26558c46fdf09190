//! Status store seam.

use async_trait::async_trait;

use crate::record::{DeploymentStatusRecord, MessageId};

/// Errors from querying the status store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The query call failed (network, auth, service error).
    #[error("status query failed: {0}")]
    Query(String),

    /// A returned item could not be decoded into a status record.
    #[error("malformed status record: {0}")]
    Malformed(String),
}

/// Read access to the deployment status table.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Fetch the completed records for a correlation id, newest first.
    ///
    /// An empty vec means the deployment is still pending.
    async fn completed_records(
        &self,
        id: &MessageId,
    ) -> Result<Vec<DeploymentStatusRecord>, StoreError>;
}
