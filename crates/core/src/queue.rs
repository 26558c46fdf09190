//! Dispatch queue seam.

use async_trait::async_trait;

use crate::record::MessageId;

/// Errors from publishing to the dispatch queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The publish call itself failed (network, auth, service error).
    #[error("queue publish failed: {0}")]
    Publish(String),

    /// The queue accepted the message but returned no message id.
    #[error("queue returned no message id")]
    MissingMessageId,
}

/// A queue that accepts deployment request payloads.
///
/// The returned [`MessageId`] is the correlation key the deployer uses
/// when writing status records.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Publish a payload, returning the queue-assigned message id.
    async fn publish(&self, payload: &str) -> Result<MessageId, QueueError>;
}
