//! Core use-case services.
//!
//! # Responsibility
//! - Compose record-store queries with geodesy into caller-facing results.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod room_finder;
