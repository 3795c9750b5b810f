//! Import-if-empty orchestration.

use super::line::{parse_line, LineOutcome, SkipReason};
use crate::model::room::Room;
use crate::repo::room_repo::{RepoError, RoomRepository};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

pub type ImportResult<T> = Result<T, ImportError>;

/// Hard import failure. Only store problems surface here; an unreadable
/// source is reported through [`ImportOutcome::SourceUnavailable`].
#[derive(Debug)]
pub enum ImportError {
    Store(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "room import failed to write store: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// A rejected data line, by 1-based line number in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Summary of a completed import pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data lines seen, header excluded.
    pub data_lines: usize,
    pub blank_lines: usize,
    /// Rows handed to the bulk upsert. Duplicate keys count once per line.
    pub records_written: usize,
    pub skipped: Vec<SkippedLine>,
    /// Store row count after commit.
    pub final_count: u64,
}

/// What an import attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Store was empty and the dataset was loaded.
    Imported(ImportReport),
    /// Store already had rows; nothing was read or written.
    AlreadyPopulated { existing: u64 },
    /// Dataset could not be opened or read; nothing was written.
    SourceUnavailable { reason: String },
}

impl ImportOutcome {
    /// Rows in the store after this attempt, when known without a query.
    pub fn final_count(&self) -> Option<u64> {
        match self {
            Self::Imported(report) => Some(report.final_count),
            Self::AlreadyPopulated { existing } => Some(*existing),
            Self::SourceUnavailable { .. } => None,
        }
    }
}

/// Opens `path` and imports it when the store is empty.
///
/// A missing or unreadable file yields [`ImportOutcome::SourceUnavailable`].
pub fn import_if_empty_from_path<R: RoomRepository>(
    repo: &mut R,
    path: impl AsRef<Path>,
) -> ImportResult<ImportOutcome> {
    let path = path.as_ref();
    if let Some(existing) = populated_count(&*repo)? {
        return Ok(ImportOutcome::AlreadyPopulated { existing });
    }

    match File::open(path) {
        Ok(file) => load_into_empty(repo, file),
        Err(err) => Ok(source_unavailable(format!(
            "cannot open `{}`: {err}",
            path.display()
        ))),
    }
}

/// Imports the dataset from `source` when the store is empty.
///
/// The first line is a header and is always discarded. Valid records are
/// collected over the whole source, then written in one bulk upsert.
///
/// # Errors
/// - [`ImportError::Store`] when counting or the bulk upsert fails. The upsert
///   is transactional, so no rows are committed in that case.
pub fn import_if_empty<R: RoomRepository>(
    repo: &mut R,
    source: impl Read,
) -> ImportResult<ImportOutcome> {
    if let Some(existing) = populated_count(&*repo)? {
        return Ok(ImportOutcome::AlreadyPopulated { existing });
    }
    load_into_empty(repo, source)
}

fn populated_count<R: RoomRepository>(repo: &R) -> ImportResult<Option<u64>> {
    let existing = repo.count()?;
    if existing > 0 {
        info!(
            "event=import_start module=import status=skip reason=store_not_empty existing={existing}"
        );
        return Ok(Some(existing));
    }
    Ok(None)
}

fn load_into_empty<R: RoomRepository>(
    repo: &mut R,
    source: impl Read,
) -> ImportResult<ImportOutcome> {
    let started_at = Instant::now();
    info!("event=import_start module=import status=start");

    let (rooms, mut report) = match scan(source) {
        Ok(scanned) => scanned,
        Err(reason) => return Ok(source_unavailable(reason)),
    };

    if !rooms.is_empty() {
        if let Err(err) = repo.upsert_all(&rooms) {
            error!(
                "event=import_error module=import status=error duration_ms={} records={} error={}",
                started_at.elapsed().as_millis(),
                rooms.len(),
                err
            );
            return Err(err.into());
        }
    }

    report.records_written = rooms.len();
    report.final_count = repo.count()?;
    info!(
        "event=import_done module=import status=ok duration_ms={} data_lines={} written={} skipped={} final_count={}",
        started_at.elapsed().as_millis(),
        report.data_lines,
        report.records_written,
        report.skipped.len(),
        report.final_count
    );

    Ok(ImportOutcome::Imported(report))
}

fn scan(source: impl Read) -> Result<(Vec<Room>, ImportReport), String> {
    let mut rooms = Vec::new();
    let mut report = ImportReport::default();
    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|err| format!("read failed at line {}: {err}", line_number + 1))?;
        if read == 0 {
            break;
        }
        line_number += 1;
        if line_number == 1 {
            continue;
        }

        report.data_lines += 1;
        // Bad bytes become U+FFFD; the line is still parsed on its own merits.
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        match parse_line(&line) {
            LineOutcome::Record(room) => rooms.push(room),
            LineOutcome::Blank => report.blank_lines += 1,
            LineOutcome::Skipped(reason) => {
                debug!(
                    "event=import_skip_line module=import status=skip line={} reason={}",
                    line_number,
                    reason.code()
                );
                report.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }

    Ok((rooms, report))
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn source_unavailable(reason: String) -> ImportOutcome {
    warn!("event=import_source_unavailable module=import status=error error={reason}");
    ImportOutcome::SourceUnavailable { reason }
}
