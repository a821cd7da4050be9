mod coordinate;
mod region;

pub use coordinate::Coordinate;
pub use region::{CityMatch, ReferenceCity, RegionLabel, REFERENCE_CITIES};
