//! Room domain model.
//!
//! # Responsibility
//! - Define the room record produced by import and returned by queries.
//! - Own key normalization and the record validity rules.
//!
//! # Invariants
//! - `building` is trimmed and uppercased; `room` is trimmed, case preserved.
//! - Neither key part is empty.
//! - `lat`/`lng` are finite degrees.

use crate::geo::GeoPoint;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate identifier.
pub type RoomId = i64;

/// Canonical room record.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// `None` until the record has been read back from the store.
    pub id: Option<RoomId>,
    /// Building code, e.g. `SH`.
    pub building: String,
    /// Room number or label, e.g. `210`.
    pub room: String,
    pub floor: Option<i32>,
    pub lat: f64,
    pub lng: f64,
    pub altitude_meters: Option<f64>,
    /// Measurement uncertainty of `lat`/`lng`, in meters.
    pub accuracy_meters: Option<f64>,
    pub notes: Option<String>,
    /// Unix epoch timestamp carried over from the dataset.
    pub created_at: Option<i64>,
}

impl Room {
    /// Creates a room with normalized key parts and no optional attributes.
    ///
    /// This constructor does not validate; call [`Room::validate`] before
    /// persisting.
    pub fn new(building: &str, room: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: None,
            building: normalize_building(building),
            room: normalize_room(room),
            floor: None,
            lat,
            lng,
            altitude_meters: None,
            accuracy_meters: None,
            notes: None,
            created_at: None,
        }
    }

    /// Checks the record invariants required for persistence.
    pub fn validate(&self) -> Result<(), RoomValidationError> {
        if self.building.trim().is_empty() {
            return Err(RoomValidationError::EmptyBuilding);
        }
        if self.room.trim().is_empty() {
            return Err(RoomValidationError::EmptyRoom);
        }
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(RoomValidationError::NonFiniteCoordinate);
        }
        Ok(())
    }

    /// Returns the room position.
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Human-readable `"{building} {room}"` label, the same text search
    /// matches against.
    pub fn label(&self) -> String {
        format!("{} {}", self.building, self.room)
    }
}

/// Normalizes a building code to its stored form.
pub fn normalize_building(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalizes a room label to its stored form.
pub fn normalize_room(value: &str) -> String {
    value.trim().to_string()
}

/// Violations of [`Room`] invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomValidationError {
    EmptyBuilding,
    EmptyRoom,
    NonFiniteCoordinate,
}

impl Display for RoomValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBuilding => write!(f, "building must not be empty"),
            Self::EmptyRoom => write!(f, "room must not be empty"),
            Self::NonFiniteCoordinate => write!(f, "lat/lng must be finite numbers"),
        }
    }
}

impl Error for RoomValidationError {}

#[cfg(test)]
mod tests {
    use super::{Room, RoomValidationError};

    #[test]
    fn new_normalizes_key_parts() {
        let room = Room::new("  sh ", " 210a ", 36.98, -86.45);
        assert_eq!(room.building, "SH");
        assert_eq!(room.room, "210a");
        assert_eq!(room.label(), "SH 210a");
    }

    #[test]
    fn validate_rejects_blank_keys_and_nan() {
        assert_eq!(
            Room::new(" ", "1", 0.0, 0.0).validate(),
            Err(RoomValidationError::EmptyBuilding)
        );
        assert_eq!(
            Room::new("SH", "", 0.0, 0.0).validate(),
            Err(RoomValidationError::EmptyRoom)
        );
        assert_eq!(
            Room::new("SH", "1", f64::NAN, 0.0).validate(),
            Err(RoomValidationError::NonFiniteCoordinate)
        );
        assert!(Room::new("SH", "1", 0.0, 0.0).validate().is_ok());
    }
}
