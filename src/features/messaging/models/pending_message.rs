use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a tracked outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "msg_{}", self.0.simple())
    }
}

/// Delivery state of a tracked message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Sending,
    Delivered,
    Failed,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageStatus::Pending => write!(f, "pending"),
            MessageStatus::Sending => write!(f, "sending"),
            MessageStatus::Delivered => write!(f, "delivered"),
            MessageStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Terminal result reported to the status callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
}

impl From<DeliveryOutcome> for MessageStatus {
    fn from(outcome: DeliveryOutcome) -> Self {
        match outcome {
            DeliveryOutcome::Delivered => MessageStatus::Delivered,
            DeliveryOutcome::Failed => MessageStatus::Failed,
        }
    }
}

/// Status as seen by callers polling the queue
///
/// `Unknown` is the normal answer once a message has finished and been dropped
/// from tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatusView {
    Delivered,
    Pending,
    Failed,
    Unknown,
}

impl From<MessageStatus> for MessageStatusView {
    fn from(status: MessageStatus) -> Self {
        match status {
            MessageStatus::Pending | MessageStatus::Sending => MessageStatusView::Pending,
            MessageStatus::Delivered => MessageStatusView::Delivered,
            MessageStatus::Failed => MessageStatusView::Failed,
        }
    }
}

/// Outbound message awaiting confirmed delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMessage {
    pub id: MessageId,
    pub conversation_id: String,
    pub content: String,
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
    pub status: MessageStatus,
}

impl PendingMessage {
    pub fn new(conversation_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id: conversation_id.into(),
            content: content.into(),
            retry_count: 0,
            created_at: Utc::now(),
            status: MessageStatus::Pending,
        }
    }
}

/// Counts over messages still being tracked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryStats {
    pub total: usize,
    pub pending: usize,
    pub failed: usize,
}
