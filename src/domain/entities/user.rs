//! Account owning exactly one watch list.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user and the reference to their watch list.
///
/// Users are created outside this crate; `watch_list_id` never changes once set.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub watch_list_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Uuid, watch_list_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            watch_list_id,
            created_at,
        }
    }
}
