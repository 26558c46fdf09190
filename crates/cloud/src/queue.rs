//! SQS-backed dispatch queue.

use async_trait::async_trait;
use aws_sdk_sqs::Client;

use deploygate_core::queue::{MessageQueue, QueueError};
use deploygate_core::record::MessageId;

/// [`MessageQueue`] implementation over an SQS queue.
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(config: &aws_config::SdkConfig, queue_url: String) -> Self {
        Self {
            client: Client::new(config),
            queue_url,
        }
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn publish(&self, payload: &str) -> Result<MessageId, QueueError> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(payload)
            .send()
            .await
            .map_err(|e| QueueError::Publish(e.to_string()))?;

        let id = output.message_id().ok_or(QueueError::MissingMessageId)?;
        tracing::debug!(message_id = id, "SQS publish accepted");
        Ok(MessageId::new(id))
    }
}
