use serde::Serialize;
use serde_json::{Map, Value};

use crate::features::geo::models::Coordinate;

/// Error reported when a record carries no usable geopoint
pub const INVALID_GEOPOINT_MESSAGE: &str = "Missing or invalid geopoint";

type GeopointStrategy = fn(&Map<String, Value>) -> Option<Coordinate>;

/// Supported record shapes, tried in order
///
/// Legacy `[lng, lat]` arrays are intentionally absent.
const STRATEGIES: &[(&str, GeopointStrategy)] = &[
    ("geopoint object", from_geopoint_object),
    ("coordinates object", from_coordinates_object),
    ("coordinates json string", from_coordinates_json_string),
];

/// Locate a coordinate inside a loosely-typed record
///
/// Returns `None` instead of failing for anything that does not match a
/// supported shape, so one bad record cannot abort a filtering pass.
pub fn extract_geopoint(record: &Value) -> Option<Coordinate> {
    let fields = record.as_object()?;

    let found = STRATEGIES.iter().find_map(|(name, strategy)| {
        strategy(fields).inspect(|coordinate| {
            tracing::trace!("Extracted geopoint {} from {}", coordinate, name);
        })
    });

    if found.is_none() && fields.get("coordinates").is_some_and(Value::is_array) {
        tracing::debug!("Ignoring legacy array coordinates on record");
    }

    found
}

/// Outcome of checking a record's geopoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeopointValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report whether a therapist record carries a usable geopoint
pub fn validate_therapist_geopoint(record: &Value) -> GeopointValidation {
    match extract_geopoint(record) {
        Some(_) => GeopointValidation {
            is_valid: true,
            error: None,
        },
        None => GeopointValidation {
            is_valid: false,
            error: Some(INVALID_GEOPOINT_MESSAGE.to_string()),
        },
    }
}

fn from_geopoint_object(fields: &Map<String, Value>) -> Option<Coordinate> {
    fields.get("geopoint").and_then(lat_lng_object)
}

fn from_coordinates_object(fields: &Map<String, Value>) -> Option<Coordinate> {
    fields.get("coordinates").and_then(lat_lng_object)
}

fn from_coordinates_json_string(fields: &Map<String, Value>) -> Option<Coordinate> {
    let raw = fields.get("coordinates")?.as_str()?;
    let parsed: Value = serde_json::from_str(raw).ok()?;
    lat_lng_object(&parsed)
}

/// Read `{ "lat": number, "lng": number }`, rejecting non-finite or out-of-range values
fn lat_lng_object(value: &Value) -> Option<Coordinate> {
    let object = value.as_object()?;
    let lat = object.get("lat")?.as_f64()?;
    let lng = object.get("lng")?.as_f64()?;

    let coordinate = Coordinate::new(lat, lng);
    coordinate.is_valid().then_some(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YOGYAKARTA: Coordinate = Coordinate::new(-7.7956, 110.3695);

    #[test]
    fn test_extract_from_coordinates_object() {
        let record = json!({ "coordinates": { "lat": -7.7956, "lng": 110.3695 } });

        assert_eq!(extract_geopoint(&record), Some(YOGYAKARTA));
    }

    #[test]
    fn test_extract_from_coordinates_json_string() {
        let record = json!({ "coordinates": "{\"lat\":-7.7956,\"lng\":110.3695}" });

        assert_eq!(extract_geopoint(&record), Some(YOGYAKARTA));
    }

    #[test]
    fn test_extract_from_geopoint_object() {
        let record = json!({ "geopoint": { "lat": -7.7956, "lng": 110.3695 } });

        assert_eq!(extract_geopoint(&record), Some(YOGYAKARTA));
    }

    #[test]
    fn test_geopoint_takes_precedence() {
        let record = json!({
            "geopoint": { "lat": -7.7956, "lng": 110.3695 },
            "coordinates": { "lat": -6.2088, "lng": 106.8456 }
        });

        assert_eq!(extract_geopoint(&record), Some(YOGYAKARTA));
    }

    #[test]
    fn test_malformed_geopoint_falls_through_to_coordinates() {
        let record = json!({
            "geopoint": { "lat": "north", "lng": 110.3695 },
            "coordinates": { "lat": -7.7956, "lng": 110.3695 }
        });

        assert_eq!(extract_geopoint(&record), Some(YOGYAKARTA));
    }

    #[test]
    fn test_legacy_array_is_rejected() {
        assert_eq!(
            extract_geopoint(&json!({ "coordinates": [110.3695, -7.7956] })),
            None
        );
        assert_eq!(
            extract_geopoint(&json!({ "coordinates": "[110.3695,-7.7956]" })),
            None
        );
    }

    #[test]
    fn test_unusable_records_return_none() {
        assert_eq!(extract_geopoint(&json!({})), None);
        assert_eq!(extract_geopoint(&json!(null)), None);
        assert_eq!(extract_geopoint(&json!("not a record")), None);
        assert_eq!(extract_geopoint(&json!({ "coordinates": "not json" })), None);
        assert_eq!(extract_geopoint(&json!({ "coordinates": { "lat": -7.7956 } })), None);
        assert_eq!(
            extract_geopoint(&json!({ "geopoint": { "lat": 91.0, "lng": 0.0 } })),
            None
        );
        assert_eq!(
            extract_geopoint(&json!({ "geopoint": { "lat": 0.0, "lng": -180.5 } })),
            None
        );
    }

    #[test]
    fn test_validate_therapist_geopoint() {
        let valid = validate_therapist_geopoint(&json!({ "geopoint": { "lat": 0.0, "lng": 0.0 } }));
        assert!(valid.is_valid);
        assert_eq!(valid.error, None);

        let invalid = validate_therapist_geopoint(&json!({ "location": "Jogja" }));
        assert!(!invalid.is_valid);
        assert_eq!(invalid.error.as_deref(), Some(INVALID_GEOPOINT_MESSAGE));
    }

    #[test]
    fn test_validation_serializes_camel_case() {
        let invalid = validate_therapist_geopoint(&json!({}));

        assert_eq!(
            serde_json::to_value(&invalid).unwrap(),
            json!({ "isValid": false, "error": "Missing or invalid geopoint" })
        );
    }
}
