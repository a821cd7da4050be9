use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::geopoint::extract_geopoint;
use crate::features::geo::models::Coordinate;
use crate::shared::constants::EARTH_RADIUS_METERS;

/// Calculate Haversine distance between two points in meters
///
/// Inputs are expected to be in range; callers validate before calling.
pub fn calculate_distance(a: Coordinate, b: Coordinate) -> f64 {
    // Order the operands so the result is bitwise symmetric
    let (p, q) = match (a.lat, a.lng).partial_cmp(&(b.lat, b.lng)) {
        Some(Ordering::Greater) => (b, a),
        _ => (a, b),
    };

    let lat1_rad = p.lat.to_radians();
    let lat2_rad = q.lat.to_radians();
    let delta_lat = (q.lat - p.lat).to_radians();
    let delta_lng = (q.lng - p.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h slightly above 1 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Check whether `point` lies within `radius_meters` of `center` (boundary inclusive)
pub fn is_within_radius(point: Coordinate, center: Coordinate, radius_meters: f64) -> bool {
    calculate_distance(point, center) <= radius_meters
}

/// Record that passed a proximity filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyRecord<'a> {
    pub record: &'a Value,
    pub coordinates: Coordinate,
    pub distance_meters: f64,
}

/// Keep records whose geopoint lies within `radius_meters` of `center`
///
/// Records without a usable geopoint are skipped rather than failing the pass.
/// Results are sorted nearest first.
pub fn filter_within_radius<'a, I>(
    records: I,
    center: Coordinate,
    radius_meters: f64,
) -> Vec<NearbyRecord<'a>>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut skipped = 0usize;

    let mut nearby: Vec<NearbyRecord<'a>> = records
        .into_iter()
        .filter_map(|record| {
            let Some(coordinates) = extract_geopoint(record) else {
                skipped += 1;
                return None;
            };

            let distance_meters = calculate_distance(coordinates, center);
            (distance_meters <= radius_meters).then_some(NearbyRecord {
                record,
                coordinates,
                distance_meters,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

    if skipped > 0 {
        tracing::debug!(
            "Skipped {} records without a valid geopoint while filtering around {}",
            skipped,
            center
        );
    }

    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JAKARTA: Coordinate = Coordinate::new(-6.2088, 106.8456);
    const BANDUNG: Coordinate = Coordinate::new(-6.9175, 107.6191);
    const YOGYAKARTA: Coordinate = Coordinate::new(-7.7956, 110.3695);

    #[test]
    fn test_haversine_distance() {
        // Jakarta to Bandung, approx 116km by Haversine
        let distance = calculate_distance(JAKARTA, BANDUNG);

        assert!(distance > 110_000.0 && distance < 125_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        assert_eq!(calculate_distance(JAKARTA, JAKARTA), 0.0);
        assert_eq!(calculate_distance(YOGYAKARTA, YOGYAKARTA), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [
            JAKARTA,
            BANDUNG,
            YOGYAKARTA,
            Coordinate::new(0.0, 0.0),
            Coordinate::new(89.9, -179.9),
            Coordinate::new(-45.123456789, 170.987654321),
        ];

        for a in points {
            for b in points {
                assert_eq!(calculate_distance(a, b), calculate_distance(b, a));
            }
        }
    }

    #[test]
    fn test_distance_is_monotonic() {
        let origin = Coordinate::new(0.0, 0.0);
        let near = calculate_distance(origin, Coordinate::new(0.0, 1.0));
        let mid = calculate_distance(origin, Coordinate::new(0.0, 10.0));
        let far = calculate_distance(origin, Coordinate::new(0.0, 100.0));

        assert!(near < mid && mid < far);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let distance = calculate_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));

        assert!(distance.is_finite());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let d = calculate_distance(JAKARTA, BANDUNG);

        assert!(is_within_radius(BANDUNG, JAKARTA, d));
        assert!(!is_within_radius(BANDUNG, JAKARTA, d - 1e-6));
        assert!(is_within_radius(JAKARTA, JAKARTA, 0.0));
    }

    #[test]
    fn test_filter_within_radius_skips_malformed_and_sorts() {
        let records = vec![
            json!({ "id": "far", "geopoint": { "lat": -7.7956, "lng": 110.3695 } }),
            json!({ "id": "legacy", "coordinates": [106.8456, -6.2088] }),
            json!({ "id": "bandung", "coordinates": { "lat": -6.9175, "lng": 107.6191 } }),
            json!({ "id": "empty" }),
            json!({ "id": "here", "coordinates": "{\"lat\":-6.2088,\"lng\":106.8456}" }),
        ];

        let nearby = filter_within_radius(&records, JAKARTA, 150_000.0);
        let ids: Vec<&str> = nearby
            .iter()
            .map(|n| n.record["id"].as_str().unwrap())
            .collect();

        assert_eq!(ids, vec!["here", "bandung"]);
        assert_eq!(nearby[0].distance_meters, 0.0);
        assert_eq!(nearby[1].coordinates, BANDUNG);
    }
}
