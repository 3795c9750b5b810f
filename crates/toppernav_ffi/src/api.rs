//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose bootstrap import, room search and walking guidance to Dart.
//! - Keep error semantics simple: every call returns an envelope.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The database path is resolved once per process.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use toppernav_core::db::open_db;
use toppernav_core::{
    core_version as core_version_inner, import_if_empty_from_path,
    init_logging as init_logging_inner, ping as ping_inner, relative_heading, GeoPoint,
    ImportOutcome, RoomFinder, RoomMatch, SqliteRoomRepository,
};

const DB_FILE_NAME: &str = "toppernav.sqlite3";
const DB_PATH_ENV: &str = "TOPPERNAV_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Result of the first-run dataset import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    /// `false` only for hard store failures.
    pub ok: bool,
    /// `imported|already_populated|source_unavailable|failed`.
    pub status: String,
    /// Rows in the store afterwards, when known.
    pub room_count: Option<u64>,
    pub skipped_lines: u32,
    pub message: String,
}

/// One search result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomItem {
    pub building: String,
    pub room: String,
    pub label: String,
    pub floor: Option<i32>,
    pub lat: f64,
    pub lng: f64,
    pub notes: Option<String>,
    pub distance_meters: Option<f64>,
    pub bearing_degrees: Option<f64>,
    pub cardinal: Option<String>,
}

/// Search response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSearchResponse {
    pub items: Vec<RoomItem>,
    pub message: String,
}

/// Guidance toward one room.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationResponse {
    pub ok: bool,
    pub distance_meters: Option<f64>,
    pub bearing_degrees: Option<f64>,
    pub cardinal: Option<String>,
    pub eta_minutes: Option<u32>,
    /// Display line, e.g. `"120 m • NE"`.
    pub status: String,
    pub floor_advice: Option<String>,
    pub on_campus: bool,
    pub message: String,
}

impl NavigationResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            distance_meters: None,
            bearing_degrees: None,
            cardinal: None,
            eta_minutes: None,
            status: String::new(),
            floor_advice: None,
            on_campus: false,
            message: message.into(),
        }
    }
}

/// Imports the bundled CSV at `csv_path` when the room store is empty.
///
/// # FFI contract
/// - Sync call; intended to run once on a background isolate at startup.
/// - A missing dataset is reported with `ok=true, status=source_unavailable`.
#[flutter_rust_bridge::frb(sync)]
pub fn import_rooms(csv_path: String) -> ImportResponse {
    import_rooms_at(&resolve_db_path(), Path::new(csv_path.trim()))
}

/// Searches rooms; `user_lat`/`user_lng` add distance and direction.
#[flutter_rust_bridge::frb(sync)]
pub fn search_rooms(
    text: String,
    user_lat: Option<f64>,
    user_lng: Option<f64>,
) -> RoomSearchResponse {
    search_rooms_at(&resolve_db_path(), &text, user_position(user_lat, user_lng))
}

/// Computes walking guidance from the user to `building room`.
#[flutter_rust_bridge::frb(sync)]
pub fn navigate_to(
    building: String,
    room: String,
    user_lat: f64,
    user_lng: f64,
    user_altitude: Option<f64>,
) -> NavigationResponse {
    navigate_to_at(
        &resolve_db_path(),
        &building,
        &room,
        GeoPoint::new(user_lat, user_lng),
        user_altitude,
    )
}

/// Arrow rotation in degrees for a device facing `device_azimuth`.
#[flutter_rust_bridge::frb(sync)]
pub fn arrow_rotation(bearing_degrees: f64, device_azimuth: f64) -> f64 {
    relative_heading(bearing_degrees, device_azimuth)
}

fn import_rooms_at(db_path: &Path, csv_path: &Path) -> ImportResponse {
    let mut conn = match open_db(db_path) {
        Ok(conn) => conn,
        Err(err) => return import_failure(format!("import_rooms failed: {err}")),
    };
    let mut repo = SqliteRoomRepository::new(&mut conn);

    match import_if_empty_from_path(&mut repo, csv_path) {
        Ok(ImportOutcome::Imported(report)) => ImportResponse {
            ok: true,
            status: "imported".to_string(),
            room_count: Some(report.final_count),
            skipped_lines: u32::try_from(report.skipped.len()).unwrap_or(u32::MAX),
            message: format!(
                "Imported {} room(s); skipped {} line(s).",
                report.final_count,
                report.skipped.len()
            ),
        },
        Ok(ImportOutcome::AlreadyPopulated { existing }) => ImportResponse {
            ok: true,
            status: "already_populated".to_string(),
            room_count: Some(existing),
            skipped_lines: 0,
            message: "Room data already present.".to_string(),
        },
        Ok(ImportOutcome::SourceUnavailable { reason }) => ImportResponse {
            ok: true,
            status: "source_unavailable".to_string(),
            room_count: None,
            skipped_lines: 0,
            message: reason,
        },
        Err(err) => import_failure(format!("import_rooms failed: {err}")),
    }
}

fn import_failure(message: String) -> ImportResponse {
    warn!("event=ffi_import module=ffi status=error error={message}");
    ImportResponse {
        ok: false,
        status: "failed".to_string(),
        room_count: None,
        skipped_lines: 0,
        message,
    }
}

fn search_rooms_at(db_path: &Path, text: &str, user: Option<GeoPoint>) -> RoomSearchResponse {
    let result = with_room_finder(db_path, |finder| {
        finder.search(text, user).map_err(|err| err.to_string())
    });

    match result {
        Ok(hits) => {
            let items = hits.into_iter().map(to_room_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No results.".to_string()
            } else {
                format!("Found {} room(s).", items.len())
            };
            RoomSearchResponse { items, message }
        }
        Err(err) => RoomSearchResponse {
            items: Vec::new(),
            message: format!("search_rooms failed: {err}"),
        },
    }
}

fn navigate_to_at(
    db_path: &Path,
    building: &str,
    room: &str,
    user: GeoPoint,
    user_altitude: Option<f64>,
) -> NavigationResponse {
    if !user.is_valid() {
        return NavigationResponse::failure("navigate_to failed: invalid user position");
    }

    let result = with_room_finder(db_path, |finder| {
        let destination = finder
            .find(building, room)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("room `{} {}` not found", building.trim(), room.trim()))?;
        let guidance = finder.guidance(user, user_altitude, &destination);
        Ok((guidance, finder.is_on_campus(user)))
    });

    match result {
        Ok((guidance, on_campus)) => NavigationResponse {
            ok: true,
            distance_meters: Some(guidance.direction.distance_meters),
            bearing_degrees: Some(guidance.direction.bearing_degrees),
            cardinal: Some(guidance.direction.cardinal.to_string()),
            eta_minutes: Some(guidance.eta_minutes),
            status: guidance.status,
            floor_advice: guidance.floor_advice,
            on_campus,
            message: if on_campus {
                String::new()
            } else {
                "You appear to be off campus.".to_string()
            },
        },
        Err(err) => NavigationResponse::failure(format!("navigate_to failed: {err}")),
    }
}

fn with_room_finder<T>(
    db_path: &Path,
    f: impl FnOnce(&RoomFinder<SqliteRoomRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let mut conn = open_db(db_path).map_err(|err| format!("room DB open failed: {err}"))?;
    let finder = RoomFinder::new(SqliteRoomRepository::new(&mut conn));
    f(&finder)
}

fn user_position(lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)).filter(GeoPoint::is_valid),
        _ => None,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn to_room_item(hit: RoomMatch) -> RoomItem {
    let RoomMatch { room, direction } = hit;
    RoomItem {
        label: room.label(),
        building: room.building,
        room: room.room,
        floor: room.floor,
        lat: room.lat,
        lng: room.lng,
        notes: room.notes,
        distance_meters: direction.map(|d| d.distance_meters),
        bearing_degrees: direction.map(|d| d.bearing_degrees),
        cardinal: direction.map(|d| d.cardinal.to_string()),
    }
}
