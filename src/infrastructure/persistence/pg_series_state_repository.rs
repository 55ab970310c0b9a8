//! PostgreSQL implementation of series state repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewSeriesState, SeriesStateEntry, SeriesStatePatch};
use crate::domain::repositories::SeriesStateRepository;
use crate::error::AppError;

pub struct PgSeriesStateRepository {
    pool: Arc<PgPool>,
}

impl PgSeriesStateRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeriesStateRepository for PgSeriesStateRepository {
    async fn create(&self, new_state: NewSeriesState) -> Result<SeriesStateEntry, AppError> {
        let entry = sqlx::query_as::<_, SeriesStateEntry>(
            r#"
            INSERT INTO series_state_entries (id, series_id, season_number, episode_number)
            VALUES ($1, $2, $3, $4)
            RETURNING id, series_id, season_number, episode_number, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_state.series_id)
        .bind(new_state.season_number)
        .bind(new_state.episode_number)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SeriesStateEntry>, AppError> {
        let entry = sqlx::query_as::<_, SeriesStateEntry>(
            r#"
            SELECT id, series_id, season_number, episode_number, created_at, updated_at
            FROM series_state_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(entry)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SeriesStateEntry>, AppError> {
        let entries = sqlx::query_as::<_, SeriesStateEntry>(
            r#"
            SELECT id, series_id, season_number, episode_number, created_at, updated_at
            FROM series_state_entries
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(entries)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: SeriesStatePatch,
    ) -> Result<Option<SeriesStateEntry>, AppError> {
        let entry = sqlx::query_as::<_, SeriesStateEntry>(
            r#"
            UPDATE series_state_entries SET
                series_id      = $2,
                season_number  = $3,
                episode_number = $4,
                updated_at     = NOW()
            WHERE id = $1
            RETURNING id, series_id, season_number, episode_number, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.series_id)
        .bind(patch.season_number)
        .bind(patch.episode_number)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(entry)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM series_state_entries WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
