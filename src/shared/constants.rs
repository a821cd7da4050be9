// =============================================================================
// GEO CONSTANTS
// =============================================================================

/// Earth's mean radius in meters (for Haversine formula)
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Nearest reference city must be within this distance to be used as the region label
pub const DEFAULT_REGION_MATCH_THRESHOLD_METERS: f64 = 50_000.0;

/// Region label returned when no reference city is close enough
pub const FALLBACK_LOCATION_ID: &str = "other";

// =============================================================================
// DELIVERY CONSTANTS
// =============================================================================

/// Maximum retry attempts after the initial send
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Timeout for a single send attempt
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 5000;
