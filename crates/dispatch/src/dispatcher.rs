//! Fetch-and-publish step.

use deploygate_core::queue::{MessageQueue, QueueError};
use deploygate_core::record::MessageId;

use crate::fetch::{FetchError, PayloadFetcher};

/// Errors from the dispatch step.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Publish(#[from] QueueError),
}

/// Fetch the payload from `payload_url` and publish it to the queue.
///
/// Returns the queue-assigned message id, the correlation key for the
/// status poller.  A publish failure aborts the run here; polling an id
/// that was never assigned cannot observe a record.
pub async fn dispatch(
    fetcher: &PayloadFetcher,
    queue: &dyn MessageQueue,
    payload_url: &str,
) -> Result<MessageId, DispatchError> {
    let payload = fetcher.fetch(payload_url).await?;
    tracing::debug!(bytes = payload.len(), "Fetched test definition payload");

    let id = queue.publish(&payload).await?;
    tracing::info!(message_id = %id, "Message sent");
    Ok(id)
}
