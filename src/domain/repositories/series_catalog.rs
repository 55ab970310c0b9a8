//! Contract of the external series catalogue.

use crate::domain::entities::Series;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Existence checks and record lookups against the series catalogue.
///
/// The watch list never writes to the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesCatalog: Send + Sync {
    /// Reports whether a series with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the catalogue cannot be reached.
    async fn exists(&self, series_id: Uuid) -> Result<bool, AppError>;

    /// Loads the catalogue records for `ids`, skipping unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the catalogue cannot be reached.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Series>, AppError>;
}
