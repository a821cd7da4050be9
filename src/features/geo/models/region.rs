use serde::Serialize;

use super::Coordinate;
use crate::shared::constants::FALLBACK_LOCATION_ID;

/// Coarse city/region identifier derived from a coordinate
///
/// Informational only. Proximity filtering always goes through distance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionLabel(&'static str);

impl RegionLabel {
    pub const OTHER: RegionLabel = RegionLabel(FALLBACK_LOCATION_ID);

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_other(&self) -> bool {
        *self == Self::OTHER
    }
}

impl std::fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl PartialEq<&str> for RegionLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Named city center used for region matching
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCity {
    pub location_id: &'static str,
    pub name: &'static str,
    pub province: &'static str,
    pub coordinates: Coordinate,
    pub aliases: &'static [&'static str],
}

impl ReferenceCity {
    pub fn label(&self) -> RegionLabel {
        RegionLabel(self.location_id)
    }

    /// Case-insensitive match against the city name and its aliases
    pub fn matches_name(&self, name: &str) -> bool {
        let normalized = name.trim();
        self.name.eq_ignore_ascii_case(normalized)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(normalized))
    }
}

/// Reference city together with its distance from a query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMatch {
    pub city: &'static ReferenceCity,
    pub distance_meters: f64,
}

const fn city(
    location_id: &'static str,
    name: &'static str,
    province: &'static str,
    lat: f64,
    lng: f64,
    aliases: &'static [&'static str],
) -> ReferenceCity {
    ReferenceCity {
        location_id,
        name,
        province,
        coordinates: Coordinate::new(lat, lng),
        aliases,
    }
}

/// Main service cities
pub static REFERENCE_CITIES: &[ReferenceCity] = &[
    city("jakarta", "Jakarta", "DKI Jakarta", -6.2088, 106.8456, &["DKI Jakarta", "Jakarta Raya"]),
    city("yogyakarta", "Yogyakarta", "DI Yogyakarta", -7.7956, 110.3695, &["Jogja", "Jogjakarta", "Yogya"]),
    city("bandung", "Bandung", "West Java", -6.9175, 107.6191, &["Paris van Java"]),
    city("surabaya", "Surabaya", "East Java", -7.2575, 112.7521, &["Kota Pahlawan"]),
    city("semarang", "Semarang", "Central Java", -6.9667, 110.4167, &[]),
    city("solo", "Solo", "Central Java", -7.5755, 110.8243, &["Surakarta"]),
    city("denpasar", "Denpasar", "Bali", -8.6705, 115.2126, &["Denpasar Bali", "Bali Capital"]),
    city("mataram", "Mataram", "West Nusa Tenggara", -8.5833, 116.1167, &["Lombok"]),
    city("medan", "Medan", "North Sumatra", 3.5952, 98.6722, &[]),
    city("palembang", "Palembang", "South Sumatra", -2.9761, 104.7754, &[]),
    city("padang", "Padang", "West Sumatra", -0.9492, 100.3543, &[]),
    city("pekanbaru", "Pekanbaru", "Riau", 0.5333, 101.4500, &[]),
    city("bandar-lampung", "Bandar Lampung", "Lampung", -5.4292, 105.2610, &["Lampung"]),
    city("banda-aceh", "Banda Aceh", "Aceh", 5.5483, 95.3238, &["Aceh"]),
    city("batam", "Batam", "Riau Islands", 1.1307, 104.0530, &[]),
    city("pontianak", "Pontianak", "West Kalimantan", -0.0263, 109.3425, &[]),
    city("banjarmasin", "Banjarmasin", "South Kalimantan", -3.3194, 114.5906, &[]),
    city("balikpapan", "Balikpapan", "East Kalimantan", -1.2379, 116.8529, &[]),
    city("samarinda", "Samarinda", "East Kalimantan", -0.5017, 117.1536, &[]),
    city("makassar", "Makassar", "South Sulawesi", -5.1477, 119.4327, &["Ujung Pandang"]),
    city("manado", "Manado", "North Sulawesi", 1.4748, 124.8421, &[]),
    city("ambon", "Ambon", "Maluku", -3.6954, 128.1814, &[]),
    city("jayapura", "Jayapura", "Papua", -2.5355, 140.7166, &[]),
];
