//! Read-time filtering and ordering of tasks.
//!
//! Nothing here mutates or caches: the view recomputes the projection from
//! the store's current tasks on every render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Task;

/// Ordering by creation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Newest first.
    #[default]
    Recent,
    /// Oldest first.
    Oldest,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Recent => "recent",
            SortOption::Oldest => "oldest",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortOption::Recent => SortOption::Oldest,
            SortOption::Oldest => SortOption::Recent,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(SortOption::Recent),
            "oldest" => Ok(SortOption::Oldest),
            other => anyhow::bail!("unknown sort option '{other}', expected 'recent' or 'oldest'"),
        }
    }
}

/// Tasks whose title or description contains `search_term` (case-insensitive),
/// ordered by creation time according to `sort`.
///
/// An empty search term keeps every task. The sort is stable, so tasks created
/// at the same instant keep their container order.
pub fn filtered_and_sorted<'a>(tasks: &'a [Task], search_term: &str, sort: SortOption) -> Vec<&'a Task> {
    let needle = search_term.to_lowercase();
    let mut projected: Vec<&Task> = tasks.iter().filter(|task| task.matches_lowercase(&needle)).collect();

    match sort {
        SortOption::Recent => projected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => projected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    projected
}
