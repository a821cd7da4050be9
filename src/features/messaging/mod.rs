pub mod models;
pub mod sender;
pub mod services;
mod workers;

pub use models::{
    DeliveryOutcome, DeliveryStats, MessageId, MessageStatus, MessageStatusView, PendingMessage,
};
pub use sender::{MessageSender, SendError};
pub use services::{DeliveryQueue, StatusCallback};
