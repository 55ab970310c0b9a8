//! A user's viewing progress for one series.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Progress record referenced from exactly one category of a watch list.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SeriesStateEntry {
    pub id: Uuid,
    pub series_id: Uuid,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeriesStateEntry {
    pub fn new(
        id: Uuid,
        series_id: Uuid,
        season_number: Option<i32>,
        episode_number: Option<i32>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            series_id,
            season_number,
            episode_number,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new progress record.
///
/// Seasons are 1-based, episodes 0-based; either may be left unset.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewSeriesState {
    pub series_id: Uuid,
    #[validate(range(min = 1))]
    pub season_number: Option<i32>,
    #[validate(range(min = 0))]
    pub episode_number: Option<i32>,
}

/// Full overwrite of a progress record's content.
///
/// Unset season or episode numbers clear the stored value.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SeriesStatePatch {
    pub series_id: Uuid,
    #[validate(range(min = 1))]
    pub season_number: Option<i32>,
    #[validate(range(min = 0))]
    pub episode_number: Option<i32>,
}
