//! API client layer for the board backend.
//!
//! This module defines the [`Backend`] trait the board store talks to, the
//! error type shared by every remote operation, and the wire representations
//! that are normalized into [`crate::entities`] before leaving this module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Column, Task};

pub mod http;

pub use http::HttpBackend;

/// Errors produced by remote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    ///
    /// Bodies shaped like `{"message": "..."}` contribute their message; any
    /// other non-empty body is used verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// Whether the user has to log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

/// Body for creating or updating a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnArgs {
    pub title: String,
    pub order: i64,
}

/// Body for creating or updating a task. `column_id` is how moves are expressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskArgs {
    pub title: String,
    pub description: String,
    pub column_id: String,
}

/// Column as the server sends it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteColumn {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub user: Option<String>,
}

/// A task's owning column: the server sends either the bare id or the
/// populated column document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Id(String),
    Expanded(RemoteColumn),
}

impl ColumnRef {
    pub fn id(&self) -> &str {
        match self {
            ColumnRef::Id(id) => id,
            ColumnRef::Expanded(column) => &column.id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            ColumnRef::Id(id) => id,
            ColumnRef::Expanded(column) => column.id,
        }
    }
}

/// Task as the server sends it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub column: ColumnRef,
    #[serde(default)]
    pub user: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RemoteColumn> for Column {
    fn from(remote: RemoteColumn) -> Self {
        Column {
            id: remote.id,
            title: remote.title,
            order: remote.order,
        }
    }
}

impl From<RemoteTask> for Task {
    fn from(remote: RemoteTask) -> Self {
        Task {
            id: remote.id,
            title: remote.title,
            description: remote.description.unwrap_or_default(),
            column_id: remote.column.into_id(),
            user_id: remote.user.unwrap_or_default(),
            created_at: remote.created_at,
        }
    }
}

/// Remote operations the board needs.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Backend: Send + Sync {
    // Authentication
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<serde_json::Value, ApiError>;

    // Columns
    async fn fetch_columns(&self) -> Result<Vec<Column>, ApiError>;
    async fn create_column(&self, args: ColumnArgs) -> Result<Column, ApiError>;
    async fn update_column(&self, id: &str, args: ColumnArgs) -> Result<Column, ApiError>;
    async fn delete_column(&self, id: &str) -> Result<(), ApiError>;

    // Tasks
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, args: TaskArgs) -> Result<Task, ApiError>;
    async fn update_task(&self, id: &str, args: TaskArgs) -> Result<Task, ApiError>;
    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_column_reference_normalizes_to_id() {
        let json = r#"{
            "_id": "t1",
            "title": "Buy milk",
            "description": "",
            "column": {"_id": "c1", "title": "Todo", "order": 0, "user": "u1"},
            "user": "u1",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let remote: RemoteTask = serde_json::from_str(json).unwrap();
        assert_eq!(remote.column.id(), "c1");

        let task: Task = remote.into();
        assert_eq!(task.column_id, "c1");
        assert_eq!(task.user_id, "u1");
    }

    #[test]
    fn missing_description_decodes_as_empty() {
        let json = r#"{"_id":"t1","title":"A","column":"c1","createdAt":"2024-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str::<RemoteTask>(json).unwrap().into();
        assert_eq!(task.description, "");
        assert_eq!(task.column_id, "c1");
    }

    #[test]
    fn status_classification() {
        assert!(ApiError::from_status(401, "").is_auth());
        assert!(ApiError::from_status(403, "nope").is_auth());
        assert_eq!(
            ApiError::from_status(404, r#"{"message":"Task not found"}"#),
            ApiError::NotFound("Task not found".to_string())
        );
        assert_eq!(
            ApiError::from_status(500, ""),
            ApiError::Status {
                status: 500,
                message: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn task_args_use_camel_case() {
        let args = TaskArgs {
            title: "A".to_string(),
            description: String::new(),
            column_id: "c1".to_string(),
        };
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["columnId"], "c1");
    }
}
