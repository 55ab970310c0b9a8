//! Series catalogue backed by the `series` table.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Series;
use crate::domain::repositories::SeriesCatalog;
use crate::error::AppError;

/// Reads the catalogue table shared with the catalogue service.
pub struct PgSeriesCatalog {
    pool: Arc<PgPool>,
}

impl PgSeriesCatalog {
    /// Creates a new catalogue reader with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeriesCatalog for PgSeriesCatalog {
    async fn exists(&self, series_id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM series WHERE id = $1)")
                .bind(series_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Series>, AppError> {
        let series = sqlx::query_as::<_, Series>(
            "SELECT id, title, created_at FROM series WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(series)
    }
}
