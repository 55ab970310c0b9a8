//! Viewing categories a tracked series can belong to.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// One of the five mutually-exclusive buckets of a watch list.
///
/// The declaration order is also the order of the numeric codes accepted by
/// [`FromStr`] (`0` = watching ... `4` = plan to watch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Watching,
        Category::Completed,
        Category::OnHold,
        Category::Dropped,
        Category::PlanToWatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Watching => "watching",
            Category::Completed => "completed",
            Category::OnHold => "on_hold",
            Category::Dropped => "dropped",
            Category::PlanToWatch => "plan_to_watch",
        }
    }

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Accepts `snake_case`, `camelCase`, `kebab-case` and numeric codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let category = match normalized.as_str() {
            "watching" | "0" => Category::Watching,
            "completed" | "1" => Category::Completed,
            "onhold" | "2" => Category::OnHold,
            "dropped" | "3" => Category::Dropped,
            "plantowatch" | "4" => Category::PlanToWatch,
            _ => {
                return Err(AppError::invalid_category(
                    "Wrong status",
                    json!({
                        "value": s,
                        "allowed": Category::ALL.map(Category::as_str),
                    }),
                ));
            }
        };

        Ok(category)
    }
}
