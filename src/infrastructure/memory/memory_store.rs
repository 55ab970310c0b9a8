//! In-process implementation of every repository trait.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::{
    Category, NewSeriesState, Series, SeriesStateEntry, SeriesStatePatch, User, WatchList,
};
use crate::domain::repositories::{
    SeriesCatalog, SeriesStateRepository, UserRepository, WatchListRepository,
};
use crate::error::AppError;

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    watch_lists: HashMap<Uuid, WatchList>,
    entries: HashMap<Uuid, SeriesStateEntry>,
    series: HashMap<Uuid, Series>,
}

/// Users, watch lists, progress entries and the series catalogue held in memory.
///
/// Each write takes the store's write lock once, so single-record operations
/// are atomic just like their PostgreSQL counterparts. Nothing is persisted.
///
/// # Use Cases
///
/// - Integration tests of the watch list service without a database
/// - Local experiments with the service API
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (nothing is persisted)");
        Self::default()
    }

    /// Provisions a user together with an empty watch list.
    pub async fn insert_user(&self) -> User {
        let user = User::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());

        let mut state = self.state.write().await;
        state
            .watch_lists
            .insert(user.watch_list_id, WatchList::new(user.watch_list_id));
        state.users.insert(user.id, user.clone());

        user
    }

    /// Adds a series to the catalogue.
    pub async fn insert_series(&self, title: &str) -> Series {
        let series = Series::new(Uuid::new_v4(), title.to_string(), Utc::now());
        self.state
            .write()
            .await
            .series
            .insert(series.id, series.clone());
        series
    }

    /// Removes a series from the catalogue. Entries pointing at it are kept.
    pub async fn remove_series(&self, series_id: Uuid) -> bool {
        self.state
            .write()
            .await
            .series
            .remove(&series_id)
            .is_some()
    }

    /// Number of progress records, referenced or not.
    pub async fn entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }
}

#[async_trait]
impl WatchListRepository for MemoryStore {
    async fn find_by_id(&self, watch_list_id: Uuid) -> Result<Option<WatchList>, AppError> {
        Ok(self
            .state
            .read()
            .await
            .watch_lists
            .get(&watch_list_id)
            .cloned())
    }

    async fn contains_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        Ok(self
            .state
            .read()
            .await
            .watch_lists
            .get(&watch_list_id)
            .is_some_and(|list| list.contains(category, entry_id)))
    }

    async fn append_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let list = state.watch_lists.get_mut(&watch_list_id).ok_or_else(|| {
            AppError::not_found(
                "Could not find watch list",
                json!({ "watch_list_id": watch_list_id }),
            )
        })?;

        list.sequence_mut(category).push(entry_id);
        Ok(())
    }

    async fn remove_entry(
        &self,
        watch_list_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let Some(list) = state.watch_lists.get_mut(&watch_list_id) else {
            return Ok(false);
        };

        let sequence = list.sequence_mut(category);
        let before = sequence.len();
        sequence.retain(|id| *id != entry_id);

        Ok(sequence.len() != before)
    }

    async fn move_entry(
        &self,
        watch_list_id: Uuid,
        from: Category,
        to: Category,
        entry_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let Some(list) = state.watch_lists.get_mut(&watch_list_id) else {
            return Ok(false);
        };

        if !list.contains(from, entry_id) {
            return Ok(false);
        }

        if from != to {
            list.sequence_mut(from).retain(|id| *id != entry_id);
            list.sequence_mut(to).push(entry_id);
        }

        Ok(true)
    }
}

#[async_trait]
impl SeriesStateRepository for MemoryStore {
    async fn create(&self, new_state: NewSeriesState) -> Result<SeriesStateEntry, AppError> {
        let now = Utc::now();
        let entry = SeriesStateEntry::new(
            Uuid::new_v4(),
            new_state.series_id,
            new_state.season_number,
            new_state.episode_number,
            now,
            now,
        );

        self.state
            .write()
            .await
            .entries
            .insert(entry.id, entry.clone());

        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SeriesStateEntry>, AppError> {
        Ok(self.state.read().await.entries.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SeriesStateEntry>, AppError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.entries.get(id).cloned())
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: SeriesStatePatch,
    ) -> Result<Option<SeriesStateEntry>, AppError> {
        let mut state = self.state.write().await;
        let Some(entry) = state.entries.get_mut(&id) else {
            return Ok(None);
        };

        entry.series_id = patch.series_id;
        entry.season_number = patch.season_number;
        entry.episode_number = patch.episode_number;
        entry.updated_at = Utc::now();

        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.state.write().await.entries.remove(&id).is_some())
    }
}

#[async_trait]
impl SeriesCatalog for MemoryStore {
    async fn exists(&self, series_id: Uuid) -> Result<bool, AppError> {
        Ok(self.state.read().await.series.contains_key(&series_id))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Series>, AppError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.series.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_user_provisions_empty_watch_list() {
        let store = MemoryStore::new();
        let user = store.insert_user().await;

        let found = UserRepository::find_by_id(&store, user.id).await.unwrap();
        assert_eq!(found, Some(user.clone()));

        let list = WatchListRepository::find_by_id(&store, user.watch_list_id)
            .await
            .unwrap()
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_append_and_remove_entry() {
        let store = MemoryStore::new();
        let user = store.insert_user().await;
        let entry_id = Uuid::new_v4();

        store
            .append_entry(user.watch_list_id, Category::Dropped, entry_id)
            .await
            .unwrap();

        assert!(
            store
                .contains_entry(user.watch_list_id, Category::Dropped, entry_id)
                .await
                .unwrap()
        );
        assert!(
            !store
                .contains_entry(user.watch_list_id, Category::Watching, entry_id)
                .await
                .unwrap()
        );

        assert!(
            !store
                .remove_entry(user.watch_list_id, Category::Watching, entry_id)
                .await
                .unwrap()
        );
        assert!(
            store
                .remove_entry(user.watch_list_id, Category::Dropped, entry_id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_append_to_missing_watch_list() {
        let store = MemoryStore::new();

        let result = store
            .append_entry(Uuid::new_v4(), Category::Watching, Uuid::new_v4())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_move_entry_appends_to_target() {
        let store = MemoryStore::new();
        let user = store.insert_user().await;
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        store
            .append_entry(user.watch_list_id, Category::Completed, a)
            .await
            .unwrap();
        store
            .append_entry(user.watch_list_id, Category::Watching, b)
            .await
            .unwrap();

        let moved = store
            .move_entry(user.watch_list_id, Category::Watching, Category::Completed, b)
            .await
            .unwrap();
        assert!(moved);

        let list = WatchListRepository::find_by_id(&store, user.watch_list_id)
            .await
            .unwrap()
            .unwrap();
        assert!(list.watching.is_empty());
        assert_eq!(list.completed, vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_overwrites_progress() {
        let store = MemoryStore::new();
        let series = store.insert_series("Fargo").await;
        let entry = store
            .create(NewSeriesState {
                series_id: series.id,
                season_number: Some(1),
                episode_number: Some(2),
            })
            .await
            .unwrap();

        let updated = store
            .update(
                entry.id,
                SeriesStatePatch {
                    series_id: series.id,
                    season_number: None,
                    episode_number: Some(7),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.season_number, None);
        assert_eq!(updated.episode_number, Some(7));
    }
}
