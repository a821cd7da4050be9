use super::distance::calculate_distance;
use crate::core::config::GeoConfig;
use crate::features::geo::models::{CityMatch, Coordinate, ReferenceCity, RegionLabel, REFERENCE_CITIES};

/// Maps coordinates to the nearest reference city
#[derive(Debug, Clone)]
pub struct RegionMatcher {
    cities: &'static [ReferenceCity],
    threshold_meters: f64,
}

impl RegionMatcher {
    pub fn new(config: &GeoConfig) -> Self {
        Self {
            cities: REFERENCE_CITIES,
            threshold_meters: config.region_match_threshold_meters,
        }
    }

    /// Label of the nearest reference city within the threshold, otherwise `other`
    pub fn derive_location_id(&self, point: Coordinate) -> RegionLabel {
        match self.find_nearest_cities(point, self.threshold_meters, 1).first() {
            Some(nearest) => nearest.city.label(),
            None => {
                tracing::debug!("No reference city within range of {}", point);
                RegionLabel::OTHER
            }
        }
    }

    /// Reference cities within `max_distance_meters`, nearest first
    pub fn find_nearest_cities(
        &self,
        point: Coordinate,
        max_distance_meters: f64,
        limit: usize,
    ) -> Vec<CityMatch> {
        let mut matches: Vec<CityMatch> = self
            .cities
            .iter()
            .map(|city| CityMatch {
                city,
                distance_meters: calculate_distance(point, city.coordinates),
            })
            .filter(|m| m.distance_meters <= max_distance_meters)
            .collect();

        matches.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        matches.truncate(limit);
        matches
    }

    /// Find a reference city by name or alias
    pub fn find_city_by_name(&self, name: &str) -> Option<&'static ReferenceCity> {
        self.cities.iter().find(|city| city.matches_name(name))
    }
}

impl Default for RegionMatcher {
    fn default() -> Self {
        Self::new(&GeoConfig::default())
    }
}

/// Derive a region label using the default match threshold
pub fn derive_location_id_from_geopoint(point: Coordinate) -> RegionLabel {
    RegionMatcher::default().derive_location_id(point)
}
