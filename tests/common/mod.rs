#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use watchlist_service::application::services::WatchListService;
use watchlist_service::infrastructure::memory::MemoryStore;

pub type MemoryService = WatchListService<MemoryStore, MemoryStore, MemoryStore, MemoryStore>;

/// Service over a fresh in-memory store, mutations serialized per user.
pub fn create_memory_service() -> (Arc<MemoryStore>, MemoryService) {
    let store = Arc::new(MemoryStore::new());
    let service = WatchListService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    (store, service)
}

pub async fn create_test_user(pool: &PgPool) -> (Uuid, Uuid) {
    let user_id = Uuid::new_v4();
    let watch_list_id = Uuid::new_v4();

    sqlx::query("INSERT INTO watch_lists (id) VALUES ($1)")
        .bind(watch_list_id)
        .execute(pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO users (id, watch_list_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(watch_list_id)
        .execute(pool)
        .await
        .unwrap();

    (user_id, watch_list_id)
}

pub async fn create_test_series(pool: &PgPool, title: &str) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO series (id, title) VALUES ($1, $2)")
        .bind(id)
        .bind(title)
        .execute(pool)
        .await
        .unwrap();

    id
}

pub async fn delete_test_series(pool: &PgPool, id: Uuid) {
    sqlx::query("DELETE FROM series WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_entries(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM series_state_entries")
        .fetch_one(pool)
        .await
        .unwrap()
}
