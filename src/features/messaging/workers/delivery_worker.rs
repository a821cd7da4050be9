use std::sync::Arc;
use tokio::time::{sleep, timeout};

use crate::features::messaging::models::{DeliveryOutcome, MessageId};
use crate::features::messaging::sender::SendError;
use crate::features::messaging::services::DeliveryState;

/// Drives delivery attempts for a single message until it finishes or is cancelled
pub(crate) struct DeliveryWorker {
    state: Arc<DeliveryState>,
    message_id: MessageId,
}

impl DeliveryWorker {
    pub(crate) fn new(state: Arc<DeliveryState>, message_id: MessageId) -> Self {
        Self { state, message_id }
    }

    /// Run attempts one after another, sleeping through the backoff in between
    pub(crate) async fn run(self) {
        while let Some((conversation_id, content, attempt)) =
            self.state.begin_attempt(self.message_id)
        {
            tracing::debug!("Send attempt {} for message {}", attempt, self.message_id);

            match self.attempt(&conversation_id, &content).await {
                Ok(()) => {
                    self.state
                        .finish(self.message_id, DeliveryOutcome::Delivered);
                    return;
                }
                Err(e) => match self.state.record_failure(self.message_id, &e) {
                    Some(delay) => sleep(delay).await,
                    None => return,
                },
            }
        }

        tracing::debug!("Message {} no longer tracked, stopping", self.message_id);
    }

    async fn attempt(&self, conversation_id: &str, content: &str) -> Result<(), SendError> {
        let limit = self.state.config().attempt_timeout;

        timeout(limit, self.state.sender().send(conversation_id, content))
            .await
            .unwrap_or_else(|_| Err(SendError::Timeout(limit.as_millis() as u64)))
    }
}
