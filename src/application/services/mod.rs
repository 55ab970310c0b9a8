//! Business logic services for the application layer.

pub mod watch_list_service;

pub use watch_list_service::WatchListService;
