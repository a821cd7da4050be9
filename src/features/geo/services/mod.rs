mod distance;
mod geopoint;
mod region_matcher;

pub use distance::{calculate_distance, filter_within_radius, is_within_radius, NearbyRecord};
pub use geopoint::{
    extract_geopoint, validate_therapist_geopoint, GeopointValidation, INVALID_GEOPOINT_MESSAGE,
};
pub use region_matcher::{derive_location_id_from_geopoint, RegionMatcher};
