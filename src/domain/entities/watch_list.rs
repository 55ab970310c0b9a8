//! Per-user aggregate of five category sequences.

use super::category::Category;
use uuid::Uuid;

/// A user's watch list: five ordered sequences of progress-entry references.
///
/// Sequences keep insertion order. An entry id is expected in at most one
/// sequence; [`WatchList::category_of`] reports the first match.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct WatchList {
    pub id: Uuid,
    pub watching: Vec<Uuid>,
    pub completed: Vec<Uuid>,
    pub on_hold: Vec<Uuid>,
    pub dropped: Vec<Uuid>,
    pub plan_to_watch: Vec<Uuid>,
}

impl WatchList {
    /// Creates an empty watch list.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn sequence(&self, category: Category) -> &[Uuid] {
        match category {
            Category::Watching => &self.watching,
            Category::Completed => &self.completed,
            Category::OnHold => &self.on_hold,
            Category::Dropped => &self.dropped,
            Category::PlanToWatch => &self.plan_to_watch,
        }
    }

    pub fn sequence_mut(&mut self, category: Category) -> &mut Vec<Uuid> {
        match category {
            Category::Watching => &mut self.watching,
            Category::Completed => &mut self.completed,
            Category::OnHold => &mut self.on_hold,
            Category::Dropped => &mut self.dropped,
            Category::PlanToWatch => &mut self.plan_to_watch,
        }
    }

    pub fn contains(&self, category: Category, entry_id: Uuid) -> bool {
        self.sequence(category).contains(&entry_id)
    }

    pub fn category_of(&self, entry_id: Uuid) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.contains(*c, entry_id))
    }

    /// All referenced entry ids, category by category, in stored order.
    pub fn entry_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.sequence(c).iter().copied())
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.sequence(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
