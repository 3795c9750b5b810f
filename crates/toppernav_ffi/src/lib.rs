//! Flutter-facing bindings for TopperNav core.

pub mod api;
