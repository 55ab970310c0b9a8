//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User lookup
//! - [`PgWatchListRepository`] - Category arrays of a watch list
//! - [`PgSeriesStateRepository`] - Viewing-progress records
//! - [`PgSeriesCatalog`] - Series existence and lookup

pub mod pg_series_catalog;
pub mod pg_series_state_repository;
pub mod pg_user_repository;
pub mod pg_watch_list_repository;
pub mod pool;

pub use pg_series_catalog::PgSeriesCatalog;
pub use pg_series_state_repository::PgSeriesStateRepository;
pub use pg_user_repository::PgUserRepository;
pub use pg_watch_list_repository::PgWatchListRepository;
pub use pool::{MIGRATOR, connect, migrate};
