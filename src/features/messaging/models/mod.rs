mod pending_message;

pub use pending_message::{
    DeliveryOutcome, DeliveryStats, MessageId, MessageStatus, MessageStatusView, PendingMessage,
};
