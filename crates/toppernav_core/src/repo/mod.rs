//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract import and queries depend on.
//! - Isolate SQLite query details from import/service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Room::validate()` before persistence.
//! - `(building, room)` is unique; writes replace rather than duplicate.

pub mod room_repo;
