//! Bundled room dataset import.
//!
//! # Responsibility
//! - Parse the comma-separated room dataset into validated `Room` records.
//! - Populate an empty record store once, in a single bulk upsert.
//!
//! # Invariants
//! - A non-empty store is never written to by import.
//! - Malformed lines are skipped individually; scanning continues.
//! - An unreadable source imports nothing and is reported, not raised.
//! - A store-write failure commits no rows and is raised to the caller.

mod line;
mod pipeline;

pub use line::{parse_line, LineOutcome, SkipReason};
pub use pipeline::{
    import_if_empty, import_if_empty_from_path, ImportError, ImportOutcome, ImportReport,
    ImportResult, SkippedLine,
};
