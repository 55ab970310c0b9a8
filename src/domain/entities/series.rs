//! Catalogue record of a series.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A series as known to the catalogue.
///
/// The watch list only relies on `id`; the remaining fields are carried
/// through to the denormalized view untouched.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Series {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Series {
    pub fn new(id: Uuid, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            created_at,
        }
    }
}
