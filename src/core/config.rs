use std::env;
use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_REGION_MATCH_THRESHOLD_METERS,
};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub delivery: DeliveryConfig,
    pub geo: GeoConfig,
}

/// Retry policy for the message delivery queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Retries after the first attempt (3 means up to 4 attempts in total)
    pub max_retries: u32,
    /// Multiplied by `2^retry_count` to get the delay before the next attempt
    pub base_delay: Duration,
    /// Upper bound for a single send attempt
    pub attempt_timeout: Duration,
}

/// Settings for coordinate to region matching
#[derive(Debug, Clone, PartialEq)]
pub struct GeoConfig {
    pub region_match_threshold_meters: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            delivery: DeliveryConfig::from_env()?,
            geo: GeoConfig::from_env()?,
        })
    }
}

impl DeliveryConfig {
    pub fn from_env() -> Result<Self, String> {
        let max_retries = env::var("DELIVERY_MAX_RETRIES")
            .unwrap_or_else(|_| DEFAULT_MAX_RETRIES.to_string())
            .parse::<u32>()
            .map_err(|_| "DELIVERY_MAX_RETRIES must be a valid number".to_string())?;

        let base_delay_ms = env::var("DELIVERY_BASE_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_BASE_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "DELIVERY_BASE_DELAY_MS must be a valid number".to_string())?;

        let attempt_timeout_ms = env::var("DELIVERY_ATTEMPT_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_ATTEMPT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "DELIVERY_ATTEMPT_TIMEOUT_MS must be a valid number".to_string())?;

        if attempt_timeout_ms == 0 {
            return Err("DELIVERY_ATTEMPT_TIMEOUT_MS must be greater than zero".to_string());
        }

        Ok(Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            attempt_timeout: Duration::from_millis(attempt_timeout_ms),
        })
    }

    /// Delay to wait before the attempt that follows the `retry_count`-th failure
    ///
    /// With the default base of one second this yields 2s, 4s and 8s for
    /// retry counts 1, 2 and 3.
    pub fn backoff_delay(&self, retry_count: u32) -> Duration {
        let factor = 2u32.checked_pow(retry_count).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            attempt_timeout: Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS),
        }
    }
}

impl GeoConfig {
    pub fn from_env() -> Result<Self, String> {
        let region_match_threshold_meters = env::var("GEO_REGION_MATCH_THRESHOLD_METERS")
            .unwrap_or_else(|_| DEFAULT_REGION_MATCH_THRESHOLD_METERS.to_string())
            .parse::<f64>()
            .map_err(|_| "GEO_REGION_MATCH_THRESHOLD_METERS must be a valid number".to_string())?;

        if !region_match_threshold_meters.is_finite() || region_match_threshold_meters < 0.0 {
            return Err(
                "GEO_REGION_MATCH_THRESHOLD_METERS must be a non-negative number".to_string(),
            );
        }

        Ok(Self {
            region_match_threshold_meters,
        })
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            region_match_threshold_meters: DEFAULT_REGION_MATCH_THRESHOLD_METERS,
        }
    }
}
