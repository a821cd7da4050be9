pub mod models;
pub mod services;

pub use models::{CityMatch, Coordinate, ReferenceCity, RegionLabel};
pub use services::{
    calculate_distance, derive_location_id_from_geopoint, extract_geopoint, filter_within_radius,
    is_within_radius, validate_therapist_geopoint, GeopointValidation, NearbyRecord,
    RegionMatcher,
};
