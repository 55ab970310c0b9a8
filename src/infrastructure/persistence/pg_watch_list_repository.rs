//! PostgreSQL implementation of watch list repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Category, WatchList};
use crate::domain::repositories::WatchListRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for watch lists.
///
/// A watch list is a single row holding one `UUID[]` column per category, so
/// every mutation below is a single-row `UPDATE` and therefore atomic.
pub struct PgWatchListRepository {
    pool: Arc<PgPool>,
}

impl PgWatchListRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Array column backing a category. Only ever interpolated from this match.
fn column(category: Category) -> &'static str {
    match category {
        Category::Watching => "watching",
        Category::Completed => "completed",
        Category::OnHold => "on_hold",
        Category::Dropped => "dropped",
        Category::PlanToWatch => "plan_to_watch",
    }
}

#[async_trait]
impl WatchListRepository for PgWatchListRepository {
    async fn find_by_id(&self, watch_list_id: Uuid) -> Result<Option<WatchList>, AppError> {
        let list = sqlx::query_as::<_, WatchList>(
            r#"
            SELECT id, watching, completed, on_hold, dropped, plan_to_watch
            FROM watch_lists
            WHERE id = $1
            "#,
        )
        .bind(watch_list_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(list)
    }

    async fn contains_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM watch_lists WHERE id = $1 AND $2 = ANY({col}))",
            col = column(category)
        );

        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(watch_list_id)
            .bind(entry_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(found)
    }

    async fn append_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE watch_lists SET {col} = array_append({col}, $2), updated_at = NOW() WHERE id = $1",
            col = column(category)
        );

        let result = sqlx::query(&sql)
            .bind(watch_list_id)
            .bind(entry_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Could not find watch list",
                json!({ "watch_list_id": watch_list_id }),
            ));
        }

        Ok(())
    }

    async fn remove_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE watch_lists SET {col} = array_remove({col}, $2), updated_at = NOW() \
             WHERE id = $1 AND $2 = ANY({col})",
            col = column(category)
        );

        let result = sqlx::query(&sql)
            .bind(watch_list_id)
            .bind(entry_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn move_entry(
        &self,
        watch_list_id: Uuid,
        from: Category,
        to: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        if from == to {
            return self.contains_entry(watch_list_id, from, entry_id).await;
        }

        let sql = format!(
            "UPDATE watch_lists SET {from} = array_remove({from}, $2), {to} = array_append({to}, $2), \
             updated_at = NOW() WHERE id = $1 AND $2 = ANY({from})",
            from = column(from),
            to = column(to)
        );

        let result = sqlx::query(&sql)
            .bind(watch_list_id)
            .bind(entry_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
