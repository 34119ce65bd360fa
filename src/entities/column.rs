use serde::{Deserialize, Serialize};

/// A named, ordered lane on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    /// Left-to-right position; values need not be contiguous.
    pub order: i64,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
        }
    }
}
