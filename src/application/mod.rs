//! Application layer: the watch list service and its read model.
//!
//! - [`services::WatchListService`] - Consistency-checked reads and mutations
//! - [`read_model`] - Denormalized watch list view assembly
//! - [`user_locks`] - Per-user serialization of mutations

pub mod read_model;
pub mod services;
pub mod user_locks;
