//! Geodesy used to guide a user toward a room.
//!
//! # Responsibility
//! - Great-circle distance between two positions.
//! - Initial compass bearing and its 8-point cardinal bucket.
//!
//! # Invariants
//! - All functions are pure; no shared state.
//! - Angles are degrees; bearings are in `[0, 360)`, clockwise from north.

mod compass;
mod haversine;

pub use compass::{bearing_degrees, relative_heading, to_cardinal, Cardinal};
pub use haversine::{distance_meters, EARTH_RADIUS_M};

/// A `(lat, lng)` position in degrees. Carries no identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns whether both components are finite and within the valid
    /// latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
