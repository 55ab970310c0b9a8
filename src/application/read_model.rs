//! Denormalized watch list view.
//!
//! Expands every reference of a [`WatchList`] into its progress entry and the
//! entry's series record, keeping each category's stored order.

use crate::domain::entities::{Category, Series, SeriesStateEntry, WatchList};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A progress entry with its series reference expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedEntry {
    pub id: Uuid,
    pub series_id: Uuid,
    /// `None` when the catalogue no longer has a record for `series_id`.
    pub series: Option<Series>,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedEntry {
    fn from_entry(entry: &SeriesStateEntry, series: Option<Series>) -> Self {
        Self {
            id: entry.id,
            series_id: entry.series_id,
            series,
            season_number: entry.season_number,
            episode_number: entry.episode_number,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenormalizedWatchList {
    pub watch_list_id: Uuid,
    pub watching: Vec<PopulatedEntry>,
    pub completed: Vec<PopulatedEntry>,
    pub on_hold: Vec<PopulatedEntry>,
    pub dropped: Vec<PopulatedEntry>,
    pub plan_to_watch: Vec<PopulatedEntry>,
}

impl DenormalizedWatchList {
    fn empty(watch_list_id: Uuid) -> Self {
        Self {
            watch_list_id,
            watching: Vec::new(),
            completed: Vec::new(),
            on_hold: Vec::new(),
            dropped: Vec::new(),
            plan_to_watch: Vec::new(),
        }
    }

    pub fn sequence(&self, category: Category) -> &[PopulatedEntry] {
        match category {
            Category::Watching => &self.watching,
            Category::Completed => &self.completed,
            Category::OnHold => &self.on_hold,
            Category::Dropped => &self.dropped,
            Category::PlanToWatch => &self.plan_to_watch,
        }
    }

    fn sequence_mut(&mut self, category: Category) -> &mut Vec<PopulatedEntry> {
        match category {
            Category::Watching => &mut self.watching,
            Category::Completed => &mut self.completed,
            Category::OnHold => &mut self.on_hold,
            Category::Dropped => &mut self.dropped,
            Category::PlanToWatch => &mut self.plan_to_watch,
        }
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.sequence(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of [`assemble`]: the view plus the references that could not be resolved.
#[derive(Debug)]
pub struct Assembled {
    pub view: DenormalizedWatchList,
    pub dangling: Vec<(Category, Uuid)>,
}

/// Builds the denormalized view.
///
/// References whose entry is missing from `entries` are left out of the view
/// and reported in [`Assembled::dangling`].
pub fn assemble(list: &WatchList, entries: &[SeriesStateEntry], series: &[Series]) -> Assembled {
    let entries_by_id: HashMap<Uuid, &SeriesStateEntry> =
        entries.iter().map(|e| (e.id, e)).collect();
    let series_by_id: HashMap<Uuid, &Series> = series.iter().map(|s| (s.id, s)).collect();

    let mut view = DenormalizedWatchList::empty(list.id);
    let mut dangling = Vec::new();

    for category in Category::ALL {
        for entry_id in list.sequence(category) {
            match entries_by_id.get(entry_id) {
                Some(entry) => {
                    let series = series_by_id.get(&entry.series_id).map(|s| (*s).clone());
                    view.sequence_mut(category)
                        .push(PopulatedEntry::from_entry(entry, series));
                }
                None => dangling.push((category, *entry_id)),
            }
        }
    }

    Assembled { view, dangling }
}
