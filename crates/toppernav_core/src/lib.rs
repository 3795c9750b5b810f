//! Core room lookup and guidance for TopperNav.
//! This crate is the single source of truth for import and query invariants.

pub mod config;
pub mod db;
pub mod geo;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CampusBounds, ConfigError, NavigationConfig};
pub use geo::{bearing_degrees, distance_meters, relative_heading, to_cardinal, Cardinal, GeoPoint};
pub use import::{
    import_if_empty, import_if_empty_from_path, parse_line, ImportError, ImportOutcome,
    ImportReport, ImportResult, LineOutcome, SkipReason, SkippedLine,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::room::{Room, RoomId, RoomValidationError};
pub use repo::room_repo::{RepoError, RepoResult, RoomRepository, SqliteRoomRepository};
pub use service::room_finder::{Guidance, RoomDirection, RoomFinder, RoomMatch};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
