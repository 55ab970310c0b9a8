//! Core domain entities of the watch list aggregate.
//!
//! Entities are plain data structures. The consistency rules that tie them
//! together live in [`crate::application::services::WatchListService`].
//!
//! # Entity Types
//!
//! - [`User`] - Account holding the reference to its watch list
//! - [`WatchList`] - Five category sequences of entry references
//! - [`SeriesStateEntry`] - Viewing progress for one series
//! - [`Series`] - Catalogue record referenced by entries
//! - [`Category`] - The five viewing categories
//!
//! Creation and overwrite payloads ([`NewSeriesState`], [`SeriesStatePatch`])
//! are validated with `validator` before they reach a repository.

pub mod category;
pub mod series;
pub mod series_state;
pub mod user;
pub mod watch_list;

pub use category::Category;
pub use series::Series;
pub use series_state::{NewSeriesState, SeriesStateEntry, SeriesStatePatch};
pub use user::User;
pub use watch_list::WatchList;
