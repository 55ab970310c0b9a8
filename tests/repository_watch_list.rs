mod common;

use common::create_test_user;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use watchlist_service::domain::entities::Category;
use watchlist_service::domain::repositories::WatchListRepository;
use watchlist_service::error::AppError;
use watchlist_service::infrastructure::persistence::PgWatchListRepository;

#[sqlx::test]
async fn test_new_watch_list_is_empty(pool: PgPool) {
    let (_, watch_list_id) = create_test_user(&pool).await;
    let repo = PgWatchListRepository::new(Arc::new(pool));

    let list = repo.find_by_id(watch_list_id).await.unwrap().unwrap();

    assert_eq!(list.id, watch_list_id);
    assert!(list.is_empty());
}

#[sqlx::test]
async fn test_find_missing_watch_list(pool: PgPool) {
    let repo = PgWatchListRepository::new(Arc::new(pool));

    let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_append_keeps_order(pool: PgPool) {
    let (_, watch_list_id) = create_test_user(&pool).await;
    let repo = PgWatchListRepository::new(Arc::new(pool));

    let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    for id in &ids {
        repo.append_entry(watch_list_id, Category::PlanToWatch, *id)
            .await
            .unwrap();
    }

    let list = repo.find_by_id(watch_list_id).await.unwrap().unwrap();

    assert_eq!(list.plan_to_watch, ids);
    assert!(list.watching.is_empty());
}

#[sqlx::test]
async fn test_append_to_missing_watch_list(pool: PgPool) {
    let repo = PgWatchListRepository::new(Arc::new(pool));

    let result = repo
        .append_entry(Uuid::new_v4(), Category::Watching, Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_contains_is_category_scoped(pool: PgPool) {
    let (_, watch_list_id) = create_test_user(&pool).await;
    let repo = PgWatchListRepository::new(Arc::new(pool));
    let entry_id = Uuid::new_v4();

    repo.append_entry(watch_list_id, Category::OnHold, entry_id)
        .await
        .unwrap();

    assert!(
        repo.contains_entry(watch_list_id, Category::OnHold, entry_id)
            .await
            .unwrap()
    );
    assert!(
        !repo
            .contains_entry(watch_list_id, Category::Dropped, entry_id)
            .await
            .unwrap()
    );
}

#[sqlx::test]
async fn test_remove_entry(pool: PgPool) {
    let (_, watch_list_id) = create_test_user(&pool).await;
    let repo = PgWatchListRepository::new(Arc::new(pool));
    let entry_id = Uuid::new_v4();

    repo.append_entry(watch_list_id, Category::Watching, entry_id)
        .await
        .unwrap();

    let wrong = repo
        .remove_entry(watch_list_id, Category::Completed, entry_id)
        .await
        .unwrap();
    let removed = repo
        .remove_entry(watch_list_id, Category::Watching, entry_id)
        .await
        .unwrap();
    let again = repo
        .remove_entry(watch_list_id, Category::Watching, entry_id)
        .await
        .unwrap();

    assert!(!wrong);
    assert!(removed);
    assert!(!again);
}

#[sqlx::test]
async fn test_move_entry(pool: PgPool) {
    let (_, watch_list_id) = create_test_user(&pool).await;
    let repo = PgWatchListRepository::new(Arc::new(pool));
    let entry_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();

    repo.append_entry(watch_list_id, Category::Watching, entry_id)
        .await
        .unwrap();
    repo.append_entry(watch_list_id, Category::Completed, other_id)
        .await
        .unwrap();

    let moved = repo
        .move_entry(
            watch_list_id,
            Category::Watching,
            Category::Completed,
            entry_id,
        )
        .await
        .unwrap();
    assert!(moved);

    let list = repo.find_by_id(watch_list_id).await.unwrap().unwrap();
    assert!(list.watching.is_empty());
    assert_eq!(list.completed, vec![other_id, entry_id]);
    assert_eq!(list.category_of(entry_id), Some(Category::Completed));

    let stale = repo
        .move_entry(watch_list_id, Category::Watching, Category::Dropped, entry_id)
        .await
        .unwrap();
    assert!(!stale);
}
