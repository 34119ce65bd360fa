//! In-memory board state for the current session.
//!
//! This module provides the [`BoardStore`] struct, the single source of truth
//! for what the UI renders. Every mutation is confirm-then-apply: the remote
//! call runs first and local state only changes once the server has answered
//! successfully. A rejected call leaves columns and tasks exactly as they were.
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard::backend::HttpBackend;
//! use taskboard::board::{BoardStore, SortOption};
//!
//! # async fn example() -> Result<(), taskboard::board::BoardError> {
//! let backend = Arc::new(HttpBackend::new("http://localhost:5000/api", Some("token".into())));
//! let mut board = BoardStore::new(backend);
//! board.load().await?;
//!
//! let todo = board.add_column("Todo").await?;
//! board.add_task("Buy milk", "", &todo.id).await?;
//! let visible = board.tasks_in_column(&todo.id, "milk", SortOption::Recent);
//! assert_eq!(visible.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod drag;
pub mod projection;

use log::{error, info};
use std::sync::Arc;

use crate::backend::{ApiError, Backend, ColumnArgs, TaskArgs};
use crate::entities::{Column, Task};

pub use drag::{DragController, DragOutcome, DragState, DropPosition};
pub use projection::{filtered_and_sorted, SortOption};

/// Why a board operation did not change anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

impl BoardError {
    pub fn is_auth(&self) -> bool {
        matches!(self, BoardError::Api(e) if e.is_auth())
    }
}

/// Direction for shifting a column one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnShift {
    Left,
    Right,
}

/// Reject titles that are empty or whitespace only.
pub fn validate_title(title: &str) -> Result<&str, &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err("Title cannot be empty")
    } else {
        Ok(trimmed)
    }
}

/// Authoritative columns and tasks for one authenticated session.
pub struct BoardStore {
    backend: Arc<dyn Backend>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl BoardStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            columns: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Columns in the order the server returned or they were added.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns in render order: ascending `order`, ties keep container order.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut ordered: Vec<&Column> = self.columns.iter().collect();
        ordered.sort_by_key(|column| column.order);
        ordered
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The projection restricted to one column, as a column renders it.
    pub fn tasks_in_column(&self, column_id: &str, search_term: &str, sort: SortOption) -> Vec<&Task> {
        filtered_and_sorted(&self.tasks, search_term, sort)
            .into_iter()
            .filter(|task| task.belongs_to(column_id))
            .collect()
    }

    /// Drop everything held for the session.
    pub fn clear(&mut self) {
        self.columns.clear();
        self.tasks.clear();
    }

    /// Fetches columns and tasks concurrently and replaces both containers.
    ///
    /// Partial success is discarded: if either fetch fails, neither container
    /// changes.
    ///
    /// # Errors
    /// Returns the first remote error encountered.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        info!("🔄 Loading board...");

        let (columns, tasks) = match tokio::try_join!(self.backend.fetch_columns(), self.backend.fetch_tasks()) {
            Ok(fetched) => fetched,
            Err(e) => {
                error!("❌ Failed to load board: {e}");
                return Err(e.into());
            }
        };

        info!("✅ Fetched {} columns and {} tasks", columns.len(), tasks.len());
        self.columns = columns;
        self.tasks = tasks;
        Ok(())
    }

    /// Creates a column at the end of the board.
    ///
    /// The new column's order is the current column count; it is appended
    /// locally with the identity the server assigned.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the creation.
    pub async fn add_column(&mut self, title: &str) -> Result<Column, BoardError> {
        let args = ColumnArgs {
            title: title.to_string(),
            order: self.columns.len() as i64,
        };

        let column = self.backend.create_column(args).await.inspect_err(|e| {
            error!("❌ Failed to create column '{title}': {e}");
        })?;

        info!("✅ Column created: {}", column.id);
        self.columns.push(column.clone());
        Ok(column)
    }

    /// Renames and/or reorders a column.
    ///
    /// # Errors
    /// [`BoardError::UnknownColumn`] without a remote call if the column is not
    /// on the board, or the backend's error.
    pub async fn update_column(&mut self, id: &str, title: &str, order: i64) -> Result<Column, BoardError> {
        if self.column(id).is_none() {
            return Err(BoardError::UnknownColumn(id.to_string()));
        }

        let args = ColumnArgs {
            title: title.to_string(),
            order,
        };
        let updated = self.backend.update_column(id, args).await.inspect_err(|e| {
            error!("❌ Failed to update column {id}: {e}");
        })?;

        if let Some(slot) = self.columns.iter_mut().find(|column| column.id == id) {
            *slot = updated.clone();
        }
        info!("✅ Column updated: {id}");
        Ok(updated)
    }

    /// Swaps a column with its neighbour in render order.
    ///
    /// Orders are first renumbered to `0..n` in render order so ties cannot
    /// carry the column past several others; only columns whose order
    /// actually changes are sent. Shifting past either edge is a no-op and
    /// returns `Ok(false)`. Updates that succeeded before a rejected one stay
    /// applied, matching what the server holds.
    ///
    /// # Errors
    /// [`BoardError::UnknownColumn`] or the backend's error.
    pub async fn move_column(&mut self, id: &str, shift: ColumnShift) -> Result<bool, BoardError> {
        let mut ordered: Vec<Column> = self.ordered_columns().into_iter().cloned().collect();
        let Some(position) = ordered.iter().position(|column| column.id == id) else {
            return Err(BoardError::UnknownColumn(id.to_string()));
        };
        let neighbour_position = match shift {
            ColumnShift::Left if position > 0 => position - 1,
            ColumnShift::Right if position + 1 < ordered.len() => position + 1,
            _ => return Ok(false),
        };
        ordered.swap(position, neighbour_position);

        for (order, column) in ordered.iter().enumerate() {
            let order = order as i64;
            if column.order != order {
                self.update_column(&column.id, &column.title, order).await?;
            }
        }
        Ok(true)
    }

    /// Deletes a column and, locally, every task in it.
    ///
    /// The server performs the authoritative cascade; this mirrors it.
    ///
    /// # Errors
    /// [`BoardError::UnknownColumn`] or the backend's error.
    pub async fn delete_column(&mut self, id: &str) -> Result<(), BoardError> {
        if self.column(id).is_none() {
            return Err(BoardError::UnknownColumn(id.to_string()));
        }

        self.backend.delete_column(id).await.inspect_err(|e| {
            error!("❌ Failed to delete column {id}: {e}");
        })?;

        self.columns.retain(|column| column.id != id);
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.belongs_to(id));
        info!("✅ Column deleted: {id} ({} tasks removed)", before - self.tasks.len());
        Ok(())
    }

    /// Creates a task in `column_id` and appends the server's copy.
    ///
    /// # Errors
    /// [`BoardError::UnknownColumn`] without a remote call, or the backend's error.
    pub async fn add_task(&mut self, title: &str, description: &str, column_id: &str) -> Result<Task, BoardError> {
        if self.column(column_id).is_none() {
            return Err(BoardError::UnknownColumn(column_id.to_string()));
        }

        let args = TaskArgs {
            title: title.to_string(),
            description: description.to_string(),
            column_id: column_id.to_string(),
        };
        let task = self.backend.create_task(args).await.inspect_err(|e| {
            error!("❌ Failed to create task '{title}': {e}");
        })?;

        info!("✅ Task created: {}", task.id);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Updates a task's title, description and column.
    ///
    /// On success the local task is replaced in place by the server's
    /// representation, so container position is preserved.
    ///
    /// # Errors
    /// [`BoardError::UnknownTask`] / [`BoardError::UnknownColumn`] without a
    /// remote call, or the backend's error.
    pub async fn edit_task(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        column_id: &str,
    ) -> Result<Task, BoardError> {
        if self.task(id).is_none() {
            return Err(BoardError::UnknownTask(id.to_string()));
        }
        if self.column(column_id).is_none() {
            return Err(BoardError::UnknownColumn(column_id.to_string()));
        }

        let args = TaskArgs {
            title: title.to_string(),
            description: description.to_string(),
            column_id: column_id.to_string(),
        };
        let updated = self.backend.update_task(id, args).await.inspect_err(|e| {
            error!("❌ Failed to update task {id}: {e}");
        })?;

        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) {
            *slot = updated.clone();
        }
        info!("✅ Task updated: {id}");
        Ok(updated)
    }

    /// Reassigns a task to another column, keeping its title and description.
    ///
    /// # Errors
    /// Same as [`BoardStore::edit_task`].
    pub async fn move_task(&mut self, task_id: &str, destination_column_id: &str) -> Result<Task, BoardError> {
        let (title, description) = match self.task(task_id) {
            Some(task) => (task.title.clone(), task.description.clone()),
            None => return Err(BoardError::UnknownTask(task_id.to_string())),
        };
        self.edit_task(task_id, &title, &description, destination_column_id)
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    /// [`BoardError::UnknownTask`] without a remote call, or the backend's error.
    pub async fn delete_task(&mut self, id: &str) -> Result<(), BoardError> {
        if self.task(id).is_none() {
            return Err(BoardError::UnknownTask(id.to_string()));
        }

        self.backend.delete_task(id).await.inspect_err(|e| {
            error!("❌ Failed to delete task {id}: {e}");
        })?;

        self.tasks.retain(|task| task.id != id);
        info!("✅ Task deleted: {id}");
        Ok(())
    }

    /// Acts on a finished drag gesture.
    ///
    /// Only [`DragOutcome::Move`] reaches the backend; every other outcome is a
    /// no-op and returns `Ok(None)`.
    pub async fn apply_drop(&mut self, outcome: &DragOutcome) -> Result<Option<Task>, BoardError> {
        match outcome {
            DragOutcome::Move { task_id, to_column } => self.move_task(task_id, to_column).await.map(Some),
            DragOutcome::Cancelled | DragOutcome::Unchanged | DragOutcome::Reordered { .. } => Ok(None),
        }
    }
}
