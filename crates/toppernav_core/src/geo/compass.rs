//! Compass bearing and cardinal buckets.

use super::GeoPoint;
use std::fmt::{Display, Formatter};

const FULL_TURN: f64 = 360.0;
const BUCKET_DEGREES: f64 = 45.0;

/// One of the 8 coarse compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    /// Clockwise from north.
    const ALL: [Cardinal; 8] = [
        Cardinal::N,
        Cardinal::NE,
        Cardinal::E,
        Cardinal::SE,
        Cardinal::S,
        Cardinal::SW,
        Cardinal::W,
        Cardinal::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl Display for Cardinal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial bearing from `from` toward `to`, in `[0, 360)`.
///
/// `0` is true north, increasing clockwise. When both points coincide the
/// direction is undefined; `0` is returned.
pub fn bearing_degrees(from: GeoPoint, to: GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lng.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Maps a bearing to the nearest of 8 compass points.
///
/// Inputs outside `[0, 360)` are wrapped first; non-finite input maps to
/// [`Cardinal::N`].
pub fn to_cardinal(bearing: f64) -> Cardinal {
    if !bearing.is_finite() {
        return Cardinal::N;
    }
    let bucket = (normalize_degrees(bearing) / BUCKET_DEGREES).round() as usize;
    Cardinal::ALL[bucket % Cardinal::ALL.len()]
}

/// Rotation to apply to an arrow so it points at `bearing` on a device
/// facing `device_azimuth`. Result is in `[-180, 180)`.
pub fn relative_heading(bearing: f64, device_azimuth: f64) -> f64 {
    normalize_degrees(bearing - device_azimuth + 180.0) - 180.0
}

fn normalize_degrees(value: f64) -> f64 {
    let wrapped = value.rem_euclid(FULL_TURN);
    // rem_euclid of a tiny negative rounds up to exactly 360.
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}
