//! Repository trait for watch list documents.

use crate::domain::entities::{Category, WatchList};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage of the five category sequences of a watch list.
///
/// Every mutating method touches a single watch list and must be atomic with
/// respect to other writes on that same watch list. Nothing here spans more
/// than one record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgWatchListRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WatchListRepository: Send + Sync {
    /// Loads a watch list with its entry references.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_id(&self, watch_list_id: Uuid) -> Result<Option<WatchList>, AppError>;

    /// Checks whether `entry_id` is referenced by the `category` sequence.
    ///
    /// Other categories are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn contains_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Appends `entry_id` to the end of the `category` sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the watch list does not exist.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn append_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError>;

    /// Removes `entry_id` from the `category` sequence.
    ///
    /// Returns `Ok(false)` if the reference was not there.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn remove_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Moves `entry_id` from the `from` sequence to the end of the `to` sequence
    /// in one write.
    ///
    /// Returns `Ok(false)` without writing if `entry_id` is not in `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn move_entry(
        &self,
        watch_list_id: Uuid,
        from: Category,
        to: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError>;
}
