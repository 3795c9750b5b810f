//! Navigation tuning configuration.
//!
//! # Responsibility
//! - Hold the thresholds used by search and guidance.
//! - Load overrides from JSON and reject nonsensical values.
//!
//! # Invariants
//! - A validated config has positive walking speed, non-negative
//!   thresholds and a non-inverted campus box.

use crate::geo::GeoPoint;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Latitude/longitude box, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CampusBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl CampusBounds {
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}

impl Default for CampusBounds {
    /// Western Kentucky University main campus, approximate.
    fn default() -> Self {
        Self {
            min_lat: 36.9820,
            max_lat: 36.9905,
            min_lng: -86.4555,
            max_lng: -86.4380,
        }
    }
}

/// Tunables for [`crate::RoomFinder`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Used for ETA estimates.
    pub walking_speed_mps: f64,
    /// Distance under which floor advice is offered.
    pub near_threshold_meters: f64,
    /// Altitude delta treated as one floor.
    pub floor_step_meters: f64,
    pub enable_floor_advice: bool,
    /// Longer queries return no results.
    pub max_query_chars: usize,
    pub campus: CampusBounds,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            walking_speed_mps: 1.4,
            near_threshold_meters: 25.0,
            floor_step_meters: 2.5,
            enable_floor_advice: true,
            max_query_chars: 40,
            campus: CampusBounds::default(),
        }
    }
}

impl NavigationConfig {
    /// Parses a JSON object; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.walking_speed_mps.is_finite() && self.walking_speed_mps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "walking_speed_mps must be > 0, got {}",
                self.walking_speed_mps
            )));
        }
        for (name, value) in [
            ("near_threshold_meters", self.near_threshold_meters),
            ("floor_step_meters", self.floor_step_meters),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        let campus = &self.campus;
        if campus.min_lat > campus.max_lat || campus.min_lng > campus.max_lng {
            return Err(ConfigError::Invalid(
                "campus bounds are inverted".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid navigation config JSON: {message}"),
            Self::Invalid(message) => write!(f, "invalid navigation config: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NavigationConfig};
    use crate::geo::GeoPoint;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = NavigationConfig::from_json_str(r#"{"walking_speed_mps": 1.0}"#)
            .expect("partial config should parse");
        assert_eq!(config.walking_speed_mps, 1.0);
        assert_eq!(config.max_query_chars, 40);
        assert_eq!(config.near_threshold_meters, 25.0);
    }

    #[test]
    fn rejects_zero_walking_speed() {
        let err = NavigationConfig::from_json_str(r#"{"walking_speed_mps": 0}"#)
            .expect_err("zero speed must be rejected");
        assert!(matches!(
            err,
            ConfigError::Invalid(message) if message.contains("walking_speed_mps")
        ));
    }

    #[test]
    fn default_campus_contains_campus_center() {
        let config = NavigationConfig::default();
        assert!(config.campus.contains(GeoPoint::new(36.98596, -86.44990)));
        assert!(!config.campus.contains(GeoPoint::new(36.0, -86.44990)));
    }
}
