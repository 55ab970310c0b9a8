//! Repository trait definitions for the domain layer.
//!
//! The persistence gateway is split per record kind, each trait exposing only
//! the operations the watch list core needs. Implementations live in
//! `crate::infrastructure`; mocks are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User lookup
//! - [`WatchListRepository`] - Category sequences of a watch list
//! - [`SeriesStateRepository`] - Viewing-progress records
//! - [`SeriesCatalog`] - Series existence oracle and record lookup

pub mod series_catalog;
pub mod series_state_repository;
pub mod user_repository;
pub mod watch_list_repository;

pub use series_catalog::SeriesCatalog;
pub use series_state_repository::SeriesStateRepository;
pub use user_repository::UserRepository;
pub use watch_list_repository::WatchListRepository;

#[cfg(test)]
pub use series_catalog::MockSeriesCatalog;
#[cfg(test)]
pub use series_state_repository::MockSeriesStateRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use watch_list_repository::MockWatchListRepository;
