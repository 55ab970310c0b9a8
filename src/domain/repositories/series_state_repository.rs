//! Repository trait for viewing-progress records.

use crate::domain::entities::{NewSeriesState, SeriesStateEntry, SeriesStatePatch};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// CRUD access to [`SeriesStateEntry`] records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSeriesStateRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesStateRepository: Send + Sync {
    /// Creates a progress record with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn create(&self, new_state: NewSeriesState) -> Result<SeriesStateEntry, AppError>;

    /// Finds a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SeriesStateEntry>, AppError>;

    /// Loads every record whose id is in `ids`. Missing ids are skipped and
    /// the result order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SeriesStateEntry>, AppError>;

    /// Overwrites series, season and episode of a record.
    ///
    /// Returns `Ok(None)` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn update(
        &self,
        id: Uuid,
        patch: SeriesStatePatch,
    ) -> Result<Option<SeriesStateEntry>, AppError>;

    /// Deletes a record. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
