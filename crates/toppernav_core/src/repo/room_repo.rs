//! Room repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide count, point lookup, pattern search and bulk upsert over `rooms`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Bulk upsert runs in one immediate transaction: all rows or none.
//! - Search results are ordered by `(building, room)` ascending.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::room::{Room, RoomValidationError};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ROOM_SELECT_SQL: &str = "SELECT
    id,
    building,
    room,
    floor,
    lat,
    lng,
    alt_m,
    accuracy_m,
    notes,
    created_at
FROM rooms";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for room persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RoomValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted room data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RoomValidationError> for RepoError {
    fn from(value: RoomValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store contract used by import and room queries.
pub trait RoomRepository {
    /// Total number of stored rooms.
    fn count(&self) -> RepoResult<u64>;
    /// Exact lookup on the stored (already normalized) key.
    fn find_by_key(&self, building: &str, room: &str) -> RepoResult<Option<Room>>;
    /// Case-insensitive `LIKE` match against `"{building} {room}"`,
    /// `building` and `room`; any hit selects the row.
    fn search(&self, pattern: &str) -> RepoResult<Vec<Room>>;
    /// Distinct building codes, ascending.
    fn list_buildings(&self) -> RepoResult<Vec<String>>;
    /// Inserts rooms, replacing any row with the same `(building, room)`.
    ///
    /// Returns the number of rows written.
    fn upsert_all(&mut self, rooms: &[Room]) -> RepoResult<usize>;
}

/// SQLite-backed room repository.
pub struct SqliteRoomRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRoomRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl RoomRepository for SqliteRoomRepository<'_> {
    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rooms;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn find_by_key(&self, building: &str, room: &str) -> RepoResult<Option<Room>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ROOM_SELECT_SQL}
             WHERE building = ?1 AND room = ?2
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![building, room])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_room_row(row)?));
        }

        Ok(None)
    }

    fn search(&self, pattern: &str) -> RepoResult<Vec<Room>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ROOM_SELECT_SQL}
             WHERE (building || ' ' || room) LIKE ?1
                OR building LIKE ?1
                OR room LIKE ?1
             ORDER BY building ASC, room ASC;"
        ))?;

        let mut rows = stmt.query([pattern])?;
        let mut rooms = Vec::new();
        while let Some(row) = rows.next()? {
            rooms.push(parse_room_row(row)?);
        }

        Ok(rooms)
    }

    fn list_buildings(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT building FROM rooms ORDER BY building ASC;")?;
        let buildings = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(buildings)
    }

    fn upsert_all(&mut self, rooms: &[Room]) -> RepoResult<usize> {
        for room in rooms {
            room.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO rooms (
                    building,
                    room,
                    floor,
                    lat,
                    lng,
                    alt_m,
                    accuracy_m,
                    notes,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for room in rooms {
                stmt.execute(params![
                    room.building.as_str(),
                    room.room.as_str(),
                    room.floor,
                    room.lat,
                    room.lng,
                    room.altitude_meters,
                    room.accuracy_meters,
                    room.notes.as_deref(),
                    room.created_at,
                ])?;
            }
        }
        tx.commit()?;

        Ok(rooms.len())
    }
}

fn parse_room_row(row: &Row<'_>) -> RepoResult<Room> {
    let room = Room {
        id: Some(row.get("id")?),
        building: row.get("building")?,
        room: row.get("room")?,
        floor: row.get("floor")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        altitude_meters: row.get("alt_m")?,
        accuracy_meters: row.get("accuracy_m")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    room.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "row `{} {}` violates room invariants: {err}",
            room.building, room.room
        ))
    })?;
    Ok(room)
}
