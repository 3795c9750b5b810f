//! Room search and walking guidance.
//!
//! # Responsibility
//! - Turn free-text queries into ranked, direction-annotated room matches.
//! - Derive ETA, status line and floor advice toward a chosen room.
//!
//! # Invariants
//! - Queries never mutate the store.
//! - Blank or over-long queries return no matches without touching the store.
//! - Rooms in a building whose code equals the query rank first; the rest
//!   keep the store's `(building, room)` order.

use crate::config::NavigationConfig;
use crate::geo::{bearing_degrees, distance_meters, to_cardinal, Cardinal, GeoPoint};
use crate::model::room::{normalize_building, normalize_room, Room};
use crate::repo::room_repo::{RepoResult, RoomRepository};
use log::debug;

const ADVICE_SEPARATOR: &str = " • ";

/// Distance and heading from a user position to a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomDirection {
    pub distance_meters: f64,
    pub bearing_degrees: f64,
    pub cardinal: Cardinal,
}

impl RoomDirection {
    pub fn between(user: GeoPoint, target: GeoPoint) -> Self {
        let bearing = bearing_degrees(user, target);
        Self {
            distance_meters: distance_meters(user, target),
            bearing_degrees: bearing,
            cardinal: to_cardinal(bearing),
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMatch {
    pub room: Room,
    /// Present when the caller supplied a user position.
    pub direction: Option<RoomDirection>,
}

/// Walking guidance toward a destination room.
#[derive(Debug, Clone, PartialEq)]
pub struct Guidance {
    pub direction: RoomDirection,
    /// Whole minutes at the configured walking speed, at least 1.
    pub eta_minutes: u32,
    /// Short display line, e.g. `"120 m • NE"`.
    pub status: String,
    /// Floor/stairs hint, only when close to the destination.
    pub floor_advice: Option<String>,
}

/// Use-case service over a [`RoomRepository`].
pub struct RoomFinder<R: RoomRepository> {
    repo: R,
    config: NavigationConfig,
}

impl<R: RoomRepository> RoomFinder<R> {
    /// Creates a finder with default navigation config.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, NavigationConfig::default())
    }

    pub fn with_config(repo: R, config: NavigationConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Searches rooms by building code, room label or `"{building} {room}"`.
    ///
    /// `query` is trimmed and matched as a case-insensitive substring.
    pub fn search(&self, query: &str, user: Option<GeoPoint>) -> RepoResult<Vec<RoomMatch>> {
        if query.chars().count() > self.config.max_query_chars {
            debug!("event=room_search module=service status=skip reason=query_too_long");
            return Ok(Vec::new());
        }
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let mut rooms = self.repo.search(&format!("%{trimmed}%"))?;
        let wanted_building = normalize_building(trimmed);
        rooms.sort_by_key(|room| room.building != wanted_building);
        debug!(
            "event=room_search module=service status=ok hits={}",
            rooms.len()
        );

        Ok(rooms
            .into_iter()
            .map(|room| {
                let direction = user.map(|user| RoomDirection::between(user, room.position()));
                RoomMatch { room, direction }
            })
            .collect())
    }

    /// Point lookup; key parts are normalized the same way import does.
    pub fn find(&self, building: &str, room: &str) -> RepoResult<Option<Room>> {
        self.repo
            .find_by_key(&normalize_building(building), &normalize_room(room))
    }

    /// Distinct building codes, ascending.
    pub fn buildings(&self) -> RepoResult<Vec<String>> {
        self.repo.list_buildings()
    }

    pub fn is_on_campus(&self, point: GeoPoint) -> bool {
        self.config.campus.contains(point)
    }

    /// Guidance from `user` toward `destination`.
    ///
    /// `user_altitude` feeds the upstairs/downstairs hint when the room has
    /// an altitude too.
    pub fn guidance(
        &self,
        user: GeoPoint,
        user_altitude: Option<f64>,
        destination: &Room,
    ) -> Guidance {
        let direction = RoomDirection::between(user, destination.position());
        let distance = direction.distance_meters;

        let floor_advice =
            if self.config.enable_floor_advice && distance <= self.config.near_threshold_meters {
                self.floor_advice(user_altitude, destination)
            } else {
                None
            };

        Guidance {
            eta_minutes: eta_minutes(distance, self.config.walking_speed_mps),
            status: format!("{distance:.0} m{ADVICE_SEPARATOR}{}", direction.cardinal),
            floor_advice,
            direction,
        }
    }

    fn floor_advice(&self, user_altitude: Option<f64>, destination: &Room) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(floor) = destination.floor {
            parts.push(format!("Proceed to floor {floor}"));
        }
        if let (Some(user_alt), Some(dest_alt)) = (user_altitude, destination.altitude_meters) {
            let climb = dest_alt - user_alt;
            if climb > self.config.floor_step_meters {
                parts.push("Go upstairs".to_string());
            } else if climb < -self.config.floor_step_meters {
                parts.push("Go downstairs".to_string());
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(ADVICE_SEPARATOR))
        }
    }
}

fn eta_minutes(distance_meters: f64, walking_speed_mps: f64) -> u32 {
    let minutes = (distance_meters / walking_speed_mps / 60.0) as u32;
    minutes.max(1)
}
