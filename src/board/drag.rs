//! Drag-and-drop gesture interpretation.
//!
//! The controller only decides what a finished gesture means. Acting on a
//! [`DragOutcome::Move`] is the board store's job.

/// A slot in a column: the column and the index within its displayed tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPosition {
    pub column_id: String,
    pub index: usize,
}

impl DropPosition {
    pub fn new(column_id: impl Into<String>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { task_id: String, source: DropPosition },
}

/// What a finished gesture asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped outside any column, or no gesture was in progress.
    Cancelled,
    /// Dropped back onto its own slot.
    Unchanged,
    /// Dropped elsewhere in the same column. Per-task order is not persisted.
    Reordered {
        task_id: String,
        column_id: String,
        from: usize,
        to: usize,
    },
    /// Dropped into another column.
    Move { task_id: String, to_column: String },
}

impl DragOutcome {
    pub fn requires_remote_call(&self) -> bool {
        matches!(self, DragOutcome::Move { .. })
    }
}

/// State machine over a single drag gesture.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_task_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    pub fn source(&self) -> Option<&DropPosition> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Start a gesture. Starting while already dragging abandons the old one.
    pub fn begin(&mut self, task_id: impl Into<String>, source: DropPosition) {
        self.state = DragState::Dragging {
            task_id: task_id.into(),
            source,
        };
    }

    /// Finish the gesture; `None` means the drop landed outside every column.
    pub fn end(&mut self, destination: Option<DropPosition>) -> DragOutcome {
        let DragState::Dragging { task_id, source } = std::mem::take(&mut self.state) else {
            return DragOutcome::Cancelled;
        };

        let Some(destination) = destination else {
            return DragOutcome::Cancelled;
        };

        if destination.column_id != source.column_id {
            DragOutcome::Move {
                task_id,
                to_column: destination.column_id,
            }
        } else if destination.index == source.index {
            DragOutcome::Unchanged
        } else {
            DragOutcome::Reordered {
                task_id,
                column_id: source.column_id,
                from: source.index,
                to: destination.index,
            }
        }
    }

    pub fn cancel(&mut self) -> DragOutcome {
        self.end(None)
    }
}
