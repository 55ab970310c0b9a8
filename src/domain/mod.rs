//! Domain layer: entities and repository contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure. Repository traits are
//! implemented in [`crate::infrastructure`] and consumed by
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
