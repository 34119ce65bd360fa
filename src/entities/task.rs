use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work item belonging to exactly one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Id of the owning column, already resolved from whatever shape the server sent.
    pub column_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    pub fn belongs_to(&self, column_id: &str) -> bool {
        self.column_id == column_id
    }
}
