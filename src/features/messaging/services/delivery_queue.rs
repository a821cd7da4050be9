use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::core::config::DeliveryConfig;
use crate::features::messaging::models::{
    DeliveryOutcome, DeliveryStats, MessageId, MessageStatus, MessageStatusView, PendingMessage,
};
use crate::features::messaging::sender::{MessageSender, SendError};
use crate::features::messaging::workers::DeliveryWorker;

/// Invoked once with the terminal outcome of a message
pub type StatusCallback = Box<dyn FnOnce(MessageId, DeliveryOutcome) + Send + 'static>;

struct TrackedMessage {
    message: PendingMessage,
    callback: Option<StatusCallback>,
    task: Option<JoinHandle<()>>,
}

/// State shared between the queue handle and its workers
pub(crate) struct DeliveryState {
    sender: Arc<dyn MessageSender>,
    config: DeliveryConfig,
    messages: Mutex<HashMap<MessageId, TrackedMessage>>,
}

impl DeliveryState {
    pub(crate) fn sender(&self) -> &dyn MessageSender {
        self.sender.as_ref()
    }

    pub(crate) fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Mark the message as sending and return its payload
    ///
    /// Returns `None` once the message is no longer tracked.
    pub(crate) fn begin_attempt(&self, id: MessageId) -> Option<(String, String, u32)> {
        let mut messages = self.messages.lock();
        let tracked = messages.get_mut(&id)?;

        tracked.message.status = MessageStatus::Sending;
        Some((
            tracked.message.conversation_id.clone(),
            tracked.message.content.clone(),
            tracked.message.retry_count + 1,
        ))
    }

    /// Record a failed attempt
    ///
    /// Returns the delay before the next attempt, or `None` when the message
    /// has finished (or was cancelled) and the worker should stop.
    pub(crate) fn record_failure(&self, id: MessageId, error: &SendError) -> Option<Duration> {
        let mut messages = self.messages.lock();
        let tracked = messages.get_mut(&id)?;

        tracked.message.retry_count += 1;
        let retry_count = tracked.message.retry_count;

        if error.is_retryable() && retry_count <= self.config.max_retries {
            tracked.message.status = MessageStatus::Pending;
            let delay = self.config.backoff_delay(retry_count);

            tracing::warn!(
                "Send attempt {} for message {} failed: {}; retry {}/{} in {}ms",
                retry_count,
                id,
                error,
                retry_count,
                self.config.max_retries,
                delay.as_millis()
            );

            return Some(delay);
        }

        drop(messages);

        if error.is_retryable() {
            tracing::error!(
                "Message {} permanently failed after {} attempts: {}",
                id,
                retry_count,
                error
            );
        } else {
            tracing::error!("Message {} rejected, not retrying: {}", id, error);
        }

        self.finish(id, DeliveryOutcome::Failed);
        None
    }

    /// Remove the message and notify its callback
    ///
    /// Removal and callback take-out happen under one lock, so a message that
    /// was cancelled concurrently is never reported.
    pub(crate) fn finish(&self, id: MessageId, outcome: DeliveryOutcome) {
        let Some(mut tracked) = self.messages.lock().remove(&id) else {
            return;
        };

        if outcome == DeliveryOutcome::Delivered {
            tracing::info!(
                "Message {} delivered to conversation {} (retries: {})",
                id,
                tracked.message.conversation_id,
                tracked.message.retry_count
            );
        }

        if let Some(callback) = tracked.callback.take() {
            callback(id, outcome);
        }
    }
}

/// In-memory tracker giving at-least-once delivery for outgoing chat messages
///
/// Each message is driven by its own task: attempts run strictly one after
/// another, with exponential backoff between failures. Clones share the same
/// tracking state.
#[derive(Clone)]
pub struct DeliveryQueue {
    state: Arc<DeliveryState>,
}

impl DeliveryQueue {
    pub fn new(sender: Arc<dyn MessageSender>, config: DeliveryConfig) -> Self {
        Self {
            state: Arc::new(DeliveryState {
                sender,
                config,
                messages: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Track a new message and start delivering it in the background
    ///
    /// Must be called from within a tokio runtime. The outcome arrives through
    /// `on_status_change` or by polling [`DeliveryQueue::get_message_status`].
    pub fn send_with_confirmation(
        &self,
        conversation_id: impl Into<String>,
        content: impl Into<String>,
        on_status_change: Option<StatusCallback>,
    ) -> MessageId {
        let message = PendingMessage::new(conversation_id, content);
        let id = message.id;

        tracing::debug!(
            "Queueing message {} for conversation {}",
            id,
            message.conversation_id
        );

        self.state.messages.lock().insert(
            id,
            TrackedMessage {
                message,
                callback: on_status_change,
                task: None,
            },
        );

        let worker = DeliveryWorker::new(Arc::clone(&self.state), id);
        let handle = tokio::spawn(worker.run());

        // The worker may already have finished and removed the entry
        if let Some(tracked) = self.state.messages.lock().get_mut(&id) {
            tracked.task = Some(handle);
        }

        id
    }

    /// Current status, or `Unknown` for ids that are not (or no longer) tracked
    pub fn get_message_status(&self, id: &MessageId) -> MessageStatusView {
        self.state
            .messages
            .lock()
            .get(id)
            .map(|tracked| tracked.message.status.into())
            .unwrap_or(MessageStatusView::Unknown)
    }

    /// Snapshot of all tracked messages, oldest first
    pub fn get_pending_messages(&self) -> Vec<PendingMessage> {
        let mut pending: Vec<PendingMessage> = self
            .state
            .messages
            .lock()
            .values()
            .map(|tracked| tracked.message.clone())
            .collect();

        pending.sort_by_key(|message| message.id);
        pending
    }

    /// Stop tracking a message without reporting an outcome
    ///
    /// Aborts any scheduled retry. Returns `false` if the id was not tracked.
    pub fn cancel_message(&self, id: &MessageId) -> bool {
        let Some(tracked) = self.state.messages.lock().remove(id) else {
            return false;
        };

        if let Some(task) = tracked.task {
            task.abort();
        }

        tracing::info!("Cancelled message {}", id);
        true
    }

    pub fn get_stats(&self) -> DeliveryStats {
        let messages = self.state.messages.lock();

        messages
            .values()
            .fold(DeliveryStats::default(), |mut stats, tracked| {
                stats.total += 1;
                match tracked.message.status {
                    MessageStatus::Pending | MessageStatus::Sending => stats.pending += 1,
                    MessageStatus::Failed => stats.failed += 1,
                    MessageStatus::Delivered => {}
                }
                stats
            })
    }
}
