//! Deployment status records and well-known status values.
//!
//! Records are written by the external deployer platform; this tool only
//! ever reads them.  A record with `completed = true` is terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status value the deployer writes when a deployment has failed.
///
/// Any other status on a terminal record counts as success.
pub const STATUS_FAILED: &str = "FAILED";

/// Queue-assigned message identifier.
///
/// Returned by the dispatch queue on publish and used as the correlation
/// key when querying the status table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One status record for a dispatched deployment.
///
/// The deployer may write several records per id as the deployment
/// progresses; the status table returns them newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatusRecord {
    /// Correlation id, equal to the dispatch [`MessageId`].
    pub id: String,
    /// Whether this record is terminal.
    pub completed: bool,
    /// Deployer-assigned status, e.g. [`STATUS_FAILED`].
    pub status: String,
    /// Free-text diagnostic from the deployer.
    pub message: String,
}

impl DeploymentStatusRecord {
    /// Whether this record reports a failed deployment.
    pub fn is_failed(&self) -> bool {
        self.status == STATUS_FAILED
    }
}
