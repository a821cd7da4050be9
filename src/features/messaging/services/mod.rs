mod delivery_queue;

pub(crate) use delivery_queue::DeliveryState;
pub use delivery_queue::{DeliveryQueue, StatusCallback};
