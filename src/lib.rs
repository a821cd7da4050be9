//! Booking marketplace core: proximity filtering for providers and reliable
//! delivery for outgoing chat messages.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::config::{Config, DeliveryConfig, GeoConfig};
pub use crate::features::geo::{
    calculate_distance, derive_location_id_from_geopoint, extract_geopoint, filter_within_radius,
    is_within_radius, validate_therapist_geopoint, Coordinate, RegionLabel, RegionMatcher,
};
pub use crate::features::messaging::{
    DeliveryOutcome, DeliveryQueue, MessageId, MessageSender, MessageStatusView, SendError,
};
