//! Single dataset line parsing.
//!
//! Column layout (0-indexed): `building`, `room`, `floor`, `lat`, `lng`,
//! `alt_m`, `accuracy_m`, `notes`, `created_at`. Only the first five are
//! mandatory. Fields are split on a bare comma; quoting is not supported.

use crate::model::room::{normalize_building, normalize_room, Room};
use std::fmt::{Display, Formatter};

const MIN_COLUMNS: usize = 5;

const COL_BUILDING: usize = 0;
const COL_ROOM: usize = 1;
const COL_FLOOR: usize = 2;
const COL_LAT: usize = 3;
const COL_LNG: usize = 4;
const COL_ALT: usize = 5;
const COL_ACCURACY: usize = 6;
const COL_NOTES: usize = 7;
const COL_CREATED_AT: usize = 8;

/// Result of parsing one data line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Line produced a valid record.
    Record(Room),
    /// Line was empty after trimming; ignored without diagnostics.
    Blank,
    /// Line was rejected.
    Skipped(SkipReason),
}

/// Why a data line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewColumns { found: usize },
    MissingBuilding,
    MissingRoom,
    MissingLatitude,
    MissingLongitude,
}

impl SkipReason {
    /// Stable short code used in log events.
    pub fn code(self) -> &'static str {
        match self {
            Self::TooFewColumns { .. } => "too_few_columns",
            Self::MissingBuilding => "missing_building",
            Self::MissingRoom => "missing_room",
            Self::MissingLatitude => "missing_lat",
            Self::MissingLongitude => "missing_lng",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewColumns { found } => {
                write!(f, "expected at least {MIN_COLUMNS} columns, found {found}")
            }
            Self::MissingBuilding => write!(f, "building is empty"),
            Self::MissingRoom => write!(f, "room is empty"),
            Self::MissingLatitude => write!(f, "lat is missing or not a number"),
            Self::MissingLongitude => write!(f, "lng is missing or not a number"),
        }
    }
}

/// Parses one data line (never the header).
pub fn parse_line(line: &str) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Blank;
    }

    // `split` keeps trailing empty fields, so "a,b,,," has five columns.
    let cols: Vec<&str> = line.split(',').collect();
    if cols.len() < MIN_COLUMNS {
        return LineOutcome::Skipped(SkipReason::TooFewColumns { found: cols.len() });
    }

    let building = normalize_building(cols[COL_BUILDING]);
    let room = normalize_room(cols[COL_ROOM]);
    let lat = parse_f64(cols[COL_LAT]);
    let lng = parse_f64(cols[COL_LNG]);

    if building.is_empty() {
        return LineOutcome::Skipped(SkipReason::MissingBuilding);
    }
    if room.is_empty() {
        return LineOutcome::Skipped(SkipReason::MissingRoom);
    }
    let Some(lat) = lat else {
        return LineOutcome::Skipped(SkipReason::MissingLatitude);
    };
    let Some(lng) = lng else {
        return LineOutcome::Skipped(SkipReason::MissingLongitude);
    };

    LineOutcome::Record(Room {
        id: None,
        building,
        room,
        floor: parse_i32(cols[COL_FLOOR]),
        lat,
        lng,
        altitude_meters: cols.get(COL_ALT).copied().and_then(parse_f64),
        accuracy_meters: cols.get(COL_ACCURACY).copied().and_then(parse_f64),
        // A present but blank column stays `Some("")`; only a missing one is absent.
        notes: cols.get(COL_NOTES).map(|raw| raw.trim().to_string()),
        created_at: cols.get(COL_CREATED_AT).copied().and_then(parse_i64),
    })
}

fn parse_i32(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn parse_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}


#[cfg(test)]
mod tests {
    use super::{parse_line, LineOutcome, SkipReason};

    fn record(line: &str) -> crate::model::room::Room {
        match parse_line(line) {
            LineOutcome::Record(room) => room,
            other => panic!("expected record for `{line}`, got {other:?}"),
        }
    }

    #[test]
    fn minimal_line_leaves_optionals_absent() {
        let room = record("sh, 210 ,2,36.97,-86.45");
        assert_eq!(room.building, "SH");
        assert_eq!(room.room, "210");
        assert_eq!(room.floor, Some(2));
        assert_eq!(room.lat, 36.97);
        assert_eq!(room.lng, -86.45);
        assert_eq!(room.altitude_meters, None);
        assert_eq!(room.accuracy_meters, None);
        assert_eq!(room.notes, None);
        assert_eq!(room.created_at, None);
    }

    #[test]
    fn full_line_maps_every_column() {
        let room = record("GRH,1001,1,36.98,-86.45,152.5,4.0,  main lobby ,1700000000000");
        assert_eq!(room.altitude_meters, Some(152.5));
        assert_eq!(room.accuracy_meters, Some(4.0));
        assert_eq!(room.notes.as_deref(), Some("main lobby"));
        assert_eq!(room.created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn zero_is_kept_distinct_from_absent() {
        let room = record("SH,B1,0,36.97,-86.45,0,,");
        assert_eq!(room.floor, Some(0));
        assert_eq!(room.altitude_meters, Some(0.0));
        assert_eq!(room.accuracy_meters, None);
    }

    #[test]
    fn unparseable_optional_numbers_become_absent() {
        let room = record("SH,210,second,36.97,-86.45,high,n/a,,yesterday");
        assert_eq!(room.floor, None);
        assert_eq!(room.altitude_meters, None);
        assert_eq!(room.accuracy_meters, None);
        assert_eq!(room.created_at, None);
    }

    #[test]
    fn trailing_empty_fields_count_as_columns() {
        assert!(matches!(parse_line("SH,210,,36.97,-86.45"), LineOutcome::Record(_)));
        assert_eq!(
            parse_line("SH,210,,36.97"),
            LineOutcome::Skipped(SkipReason::TooFewColumns { found: 4 })
        );
    }

    #[test]
    fn required_fields_gate_the_line() {
        assert_eq!(
            parse_line("SH,,2,36.97,-86.45"),
            LineOutcome::Skipped(SkipReason::MissingRoom)
        );
        assert_eq!(
            parse_line("  ,210,2,36.97,-86.45"),
            LineOutcome::Skipped(SkipReason::MissingBuilding)
        );
        assert_eq!(
            parse_line("SH,210,2,,-86.45"),
            LineOutcome::Skipped(SkipReason::MissingLatitude)
        );
        assert_eq!(
            parse_line("SH,210,2,36.97,west"),
            LineOutcome::Skipped(SkipReason::MissingLongitude)
        );
        assert_eq!(
            parse_line("SH,210,2,NaN,-86.45"),
            LineOutcome::Skipped(SkipReason::MissingLatitude)
        );
    }

    #[test]
    fn blank_notes_column_differs_from_missing_one() {
        let present = record("SH,210,2,36.97,-86.45,,,  ,");
        assert_eq!(present.notes.as_deref(), Some(""));

        let missing = record("SH,210,2,36.97,-86.45");
        assert_eq!(missing.notes, None);
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        assert_eq!(parse_line("   \t "), LineOutcome::Blank);
        assert_eq!(parse_line(""), LineOutcome::Blank);
    }
}
