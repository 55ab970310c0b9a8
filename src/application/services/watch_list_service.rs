//! Watch list aggregate service.

use std::sync::Arc;

use crate::application::read_model::{DenormalizedWatchList, assemble};
use crate::application::user_locks::UserLocks;
use crate::domain::entities::{
    Category, NewSeriesState, SeriesStateEntry, SeriesStatePatch, User, WatchList,
};
use crate::domain::repositories::{
    SeriesCatalog, SeriesStateRepository, UserRepository, WatchListRepository,
};
use crate::error::AppError;
use serde_json::json;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Number of idle per-user locks tolerated before the table is pruned.
const LOCK_PRUNE_THRESHOLD: usize = 1024;

/// Owns every read and mutation of a user's watch list.
///
/// Enforces that a series is tracked in at most one category per user. All
/// operations resolve the user first and fail fast with
/// [`AppError::NotFound`] if it does not exist.
///
/// Mutations of one user are serialized through [`UserLocks`] unless disabled
/// with [`WatchListService::with_serialized_mutations`]. Without it, two
/// concurrent adds of the same series can both pass the duplicate check.
pub struct WatchListService<U, W, S, C>
where
    U: UserRepository,
    W: WatchListRepository,
    S: SeriesStateRepository,
    C: SeriesCatalog,
{
    users: Arc<U>,
    watch_lists: Arc<W>,
    entries: Arc<S>,
    catalog: Arc<C>,
    locks: Option<UserLocks>,
}

impl<U, W, S, C> WatchListService<U, W, S, C>
where
    U: UserRepository,
    W: WatchListRepository,
    S: SeriesStateRepository,
    C: SeriesCatalog,
{
    /// Creates a new service with per-user serialization enabled.
    pub fn new(users: Arc<U>, watch_lists: Arc<W>, entries: Arc<S>, catalog: Arc<C>) -> Self {
        Self {
            users,
            watch_lists,
            entries,
            catalog,
            locks: Some(UserLocks::new()),
        }
    }

    /// Enables or disables per-user serialization of mutations.
    pub fn with_serialized_mutations(mut self, enabled: bool) -> Self {
        self.locks = enabled.then(UserLocks::new);
        self
    }

    /// Returns the user's watch list with every entry and series expanded.
    ///
    /// Each category keeps its stored order. References to entries that no
    /// longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user or their watch list does not exist.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn get_watch_list(&self, user_id: Uuid) -> Result<DenormalizedWatchList, AppError> {
        let user = self.resolve_user(user_id).await?;
        let list = self.load_watch_list(&user).await?;

        let entry_ids: Vec<Uuid> = list.entry_ids().collect();
        let entries = if entry_ids.is_empty() {
            Vec::new()
        } else {
            self.entries.find_by_ids(&entry_ids).await?
        };

        let mut series_ids: Vec<Uuid> = entries.iter().map(|e| e.series_id).collect();
        series_ids.sort_unstable();
        series_ids.dedup();

        let series = if series_ids.is_empty() {
            Vec::new()
        } else {
            self.catalog.find_by_ids(&series_ids).await?
        };

        let assembled = assemble(&list, &entries, &series);
        for (category, entry_id) in &assembled.dangling {
            warn!(
                %user_id,
                watch_list_id = %list.id,
                %category,
                %entry_id,
                "Watch list references a missing entry"
            );
        }

        debug!(%user_id, entries = assembled.view.len(), "Watch list loaded");
        Ok(assembled.view)
    }

    /// Starts tracking a series in `category`.
    ///
    /// The series must exist in the catalogue and must not be tracked in any
    /// category of the watch list yet, the target one included. The entry
    /// record is only created once both checks pass.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if season or episode is out of range.
    /// Returns [`AppError::NotFound`] if the user or their watch list does not exist.
    /// Returns [`AppError::InvalidSeries`] if the catalogue does not know the series.
    /// Returns [`AppError::DuplicateSeries`] if the series is already tracked.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn add_to_category(
        &self,
        user_id: Uuid,
        category: Category,
        series_id: Uuid,
        season_number: Option<i32>,
        episode_number: Option<i32>,
    ) -> Result<SeriesStateEntry, AppError> {
        let new_state = NewSeriesState {
            series_id,
            season_number,
            episode_number,
        };

        let result = self.try_add(user_id, category, new_state).await;
        self.after_mutation("add", category, &result);
        result
    }

    /// Stops tracking the entry `entry_id` in `category` and deletes the entry record.
    ///
    /// Only `category` is searched: naming the wrong category fails even if
    /// the entry is tracked elsewhere. Deleting the record is best-effort once
    /// the reference is gone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist or the entry
    /// is not in `category`.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn remove_from_category(
        &self,
        user_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        let result = self.try_remove(user_id, category, entry_id).await;
        self.after_mutation("remove", category, &result);
        result
    }

    /// Overwrites series, season and episode of an entry tracked in `category`.
    ///
    /// The entry keeps its id and its place in the sequence. When the series
    /// changes, the new one must exist and must not be tracked by another entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if season or episode is out of range.
    /// Returns [`AppError::NotFound`] if the user does not exist or the entry
    /// is not in `category`.
    /// Returns [`AppError::InvalidSeries`] if the new series is unknown.
    /// Returns [`AppError::DuplicateSeries`] if the new series is tracked elsewhere.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn update_in_category(
        &self,
        user_id: Uuid,
        category: Category,
        entry_id: Uuid,
        series_id: Uuid,
        season_number: Option<i32>,
        episode_number: Option<i32>,
    ) -> Result<SeriesStateEntry, AppError> {
        let patch = SeriesStatePatch {
            series_id,
            season_number,
            episode_number,
        };

        let result = self.try_update(user_id, category, entry_id, patch).await;
        self.after_mutation("update", category, &result);
        result
    }

    /// Moves an entry from `from` to the end of `to` in a single write.
    ///
    /// Moving within the same category leaves the sequence untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist or the entry
    /// is not in `from`.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn move_to_category(
        &self,
        user_id: Uuid,
        from: Category,
        to: Category,
        entry_id: Uuid,
    ) -> Result<SeriesStateEntry, AppError> {
        let result = self.try_move(user_id, from, to, entry_id).await;
        self.after_mutation("move", to, &result);
        result
    }

    async fn try_add(
        &self,
        user_id: Uuid,
        category: Category,
        new_state: NewSeriesState,
    ) -> Result<SeriesStateEntry, AppError> {
        let series_id = new_state.series_id;

        let _guard = self.lock_user(user_id).await;
        let user = self.resolve_user(user_id).await?;
        new_state.validate()?;
        self.ensure_series_exists(series_id).await?;

        let list = self.load_watch_list(&user).await?;
        self.ensure_not_tracked(&list, series_id, None).await?;

        let entry = self.entries.create(new_state).await?;

        if let Err(e) = self
            .watch_lists
            .append_entry(list.id, category, entry.id)
            .await
        {
            if let Err(cleanup) = self.entries.delete(entry.id).await {
                warn!(entry_id = %entry.id, error = %cleanup, "Failed to delete unreferenced entry");
            }
            return Err(e);
        }

        info!(%user_id, %category, %series_id, entry_id = %entry.id, "Series added to watch list");
        Ok(entry)
    }

    async fn try_remove(
        &self,
        user_id: Uuid,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        let _guard = self.lock_user(user_id).await;
        let user = self.resolve_user(user_id).await?;
        self.ensure_in_category(&user, category, entry_id).await?;

        if !self
            .watch_lists
            .remove_entry(user.watch_list_id, category, entry_id)
            .await?
        {
            return Err(entry_not_in_category(category, entry_id));
        }

        // The reference is already gone; a failed delete only leaves an
        // unreferenced record behind.
        match self.entries.delete(entry_id).await {
            Ok(true) => {}
            Ok(false) => warn!(%entry_id, "Removed reference pointed to a missing entry"),
            Err(e) => warn!(%entry_id, error = %e, "Failed to delete removed entry"),
        }

        info!(%user_id, %category, %entry_id, "Entry removed from watch list");
        Ok(())
    }

    async fn try_update(
        &self,
        user_id: Uuid,
        category: Category,
        entry_id: Uuid,
        patch: SeriesStatePatch,
    ) -> Result<SeriesStateEntry, AppError> {
        let series_id = patch.series_id;

        let _guard = self.lock_user(user_id).await;
        let user = self.resolve_user(user_id).await?;
        patch.validate()?;
        self.ensure_in_category(&user, category, entry_id).await?;

        let current = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;

        // Only a change of series can break cross-category uniqueness.
        if current.series_id != series_id {
            self.ensure_series_exists(series_id).await?;
            let list = self.load_watch_list(&user).await?;
            self.ensure_not_tracked(&list, series_id, Some(entry_id))
                .await?;
        }

        let updated = self
            .entries
            .update(entry_id, patch)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;

        info!(%user_id, %category, %entry_id, %series_id, "Entry updated");
        Ok(updated)
    }

    async fn try_move(
        &self,
        user_id: Uuid,
        from: Category,
        to: Category,
        entry_id: Uuid,
    ) -> Result<SeriesStateEntry, AppError> {
        let _guard = self.lock_user(user_id).await;
        let user = self.resolve_user(user_id).await?;
        self.ensure_in_category(&user, from, entry_id).await?;

        let entry = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;

        if from != to
            && !self
                .watch_lists
                .move_entry(user.watch_list_id, from, to, entry_id)
                .await?
        {
            return Err(entry_not_in_category(from, entry_id));
        }

        info!(%user_id, %from, %to, %entry_id, "Entry moved");
        Ok(entry)
    }

    async fn lock_user(&self, user_id: Uuid) -> Option<OwnedMutexGuard<()>> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(user_id).await),
            None => None,
        }
    }

    async fn resolve_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find user", json!({ "user_id": user_id })))
    }

    async fn load_watch_list(&self, user: &User) -> Result<WatchList, AppError> {
        self.watch_lists
            .find_by_id(user.watch_list_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Could not find watch list",
                    json!({ "user_id": user.id, "watch_list_id": user.watch_list_id }),
                )
            })
    }

    async fn ensure_series_exists(&self, series_id: Uuid) -> Result<(), AppError> {
        if self.catalog.exists(series_id).await? {
            Ok(())
        } else {
            Err(AppError::invalid_series(
                "Series does not exist",
                json!({ "series_id": series_id }),
            ))
        }
    }

    async fn ensure_in_category(
        &self,
        user: &User,
        category: Category,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .watch_lists
            .contains_entry(user.watch_list_id, category, entry_id)
            .await?
        {
            Ok(())
        } else {
            Err(entry_not_in_category(category, entry_id))
        }
    }

    /// Fails if any entry of `list` other than `except` tracks `series_id`,
    /// whatever its category.
    async fn ensure_not_tracked(
        &self,
        list: &WatchList,
        series_id: Uuid,
        except: Option<Uuid>,
    ) -> Result<(), AppError> {
        let entry_ids: Vec<Uuid> = list
            .entry_ids()
            .filter(|id| Some(*id) != except)
            .collect();

        if entry_ids.is_empty() {
            return Ok(());
        }

        let entries = self.entries.find_by_ids(&entry_ids).await?;

        match entries.iter().find(|e| e.series_id == series_id) {
            Some(existing) => Err(AppError::duplicate_series(
                "Series exist on the watchlist",
                json!({
                    "series_id": series_id,
                    "entry_id": existing.id,
                    "category": list.category_of(existing.id),
                }),
            )),
            None => Ok(()),
        }
    }

    fn after_mutation<T>(&self, op: &'static str, category: Category, result: &Result<T, AppError>) {
        match result {
            Ok(_) => {
                metrics::counter!(
                    "watchlist_mutations_total",
                    "op" => op,
                    "category" => category.as_str()
                )
                .increment(1);
            }
            Err(e) => {
                debug!(op, %category, error = %e, "Watch list mutation rejected");
                metrics::counter!(
                    "watchlist_rejections_total",
                    "op" => op,
                    "reason" => e.code()
                )
                .increment(1);
            }
        }

        if let Some(locks) = &self.locks {
            if locks.len() > LOCK_PRUNE_THRESHOLD {
                locks.prune();
            }
        }
    }
}

fn entry_not_in_category(category: Category, entry_id: Uuid) -> AppError {
    AppError::not_found(
        "Could not find seriesState",
        json!({ "category": category, "entry_id": entry_id }),
    )
}

fn entry_not_found(entry_id: Uuid) -> AppError {
    AppError::not_found("Entry record not found", json!({ "entry_id": entry_id }))
}
