//! Domain model for indoor room lookup.
//!
//! # Responsibility
//! - Define the canonical room record shared by import, store and queries.
//!
//! # Invariants
//! - A room is identified by its `(building, room)` natural key.
//! - Surrogate ids are store-assigned and not stable across reimport.

pub mod room;
