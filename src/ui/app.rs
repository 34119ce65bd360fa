//! Application state and intent dispatch
//!
//! `App` owns the board store for the lifetime of the session. Event handlers
//! call the methods here, which await the store inline; the store is never
//! touched from anywhere else.

use log::{info, warn};
use ratatui::layout::Rect;

use crate::board::{validate_title, BoardError, BoardStore, ColumnShift, DragController, DragOutcome, DropPosition, SortOption};
use crate::config::Config;
use crate::constants::{
    ERROR_COLUMN_CREATE_FAILED, ERROR_COLUMN_DELETE_FAILED, ERROR_COLUMN_UPDATE_FAILED, ERROR_LOAD_FAILED,
    ERROR_SESSION_EXPIRED, ERROR_TASK_CREATE_FAILED, ERROR_TASK_DELETE_FAILED, ERROR_TASK_MOVE_FAILED,
    ERROR_TASK_UPDATE_FAILED, INFO_REORDER_NOT_SAVED, SUCCESS_COLUMN_CREATED, SUCCESS_COLUMN_DELETED,
    SUCCESS_COLUMN_UPDATED, SUCCESS_TASK_CREATED, SUCCESS_TASK_DELETED, SUCCESS_TASK_MOVED, SUCCESS_TASK_UPDATED,
};
use crate::entities::{Column, Task};
use crate::logger::Logger;
use crate::session::Session;

/// Which task form field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFormMode {
    Add { column_id: String },
    Edit { task_id: String, column_id: String },
}

/// State of the add/edit task dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: TaskFormMode,
    pub title: String,
    pub description: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn add(column_id: &str) -> Self {
        Self {
            mode: TaskFormMode::Add {
                column_id: column_id.to_string(),
            },
            title: String::new(),
            description: String::new(),
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: TaskFormMode::Edit {
                task_id: task.id.clone(),
                column_id: task.column_id.clone(),
            },
            title: task.title.clone(),
            description: task.description.clone(),
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, TaskFormMode::Edit { .. })
    }

    pub fn focused_input(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Task { id: String, title: String },
    Column { id: String, title: String, task_count: usize },
}

/// Modal overlays; at most one is open at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Create (`column_id: None`) or rename a column
    ColumnTitle {
        column_id: Option<String>,
        input: String,
        error: Option<String>,
    },
    TaskForm(TaskForm),
    ConfirmDelete(DeleteTarget),
    TaskDetails { task_id: String },
    /// Search edits `App::search_term` live; `previous` is restored on Esc
    Search { previous: String },
    Help { scroll: u16 },
    Logs { scroll: u16 },
}

/// Screen area of a rendered column and its task cards, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnArea {
    pub column_id: String,
    pub area: Rect,
    /// Index of the task drawn in `cards[0]` when the column is scrolled
    pub first_card: usize,
    pub cards: Vec<Rect>,
}

/// Destination chosen with the keyboard while a task is grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTarget {
    pub column: usize,
    pub index: usize,
}

/// Application state
pub struct App {
    pub board: BoardStore,
    pub session: Session,
    pub config: Config,
    pub logger: Logger,

    // Projection inputs
    pub search_term: String,
    pub sort: SortOption,

    // Selection (indices into ordered columns / projected tasks)
    pub selected_column: usize,
    pub selected_task: usize,
    pub column_offset: usize,

    // Drag and drop
    pub drag: DragController,
    pub drag_target: Option<DragTarget>,
    pub mouse_hover: Option<DropPosition>,

    // Overlays and messages
    pub dialog: Option<Dialog>,
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    pub loading: bool,
    pub should_quit: bool,
    pub logged_out: bool,

    /// Filled by the board renderer, used for mouse hit-testing
    pub column_areas: Vec<ColumnArea>,
}

impl App {
    /// Create a new App instance
    #[must_use]
    pub fn new(board: BoardStore, session: Session, config: Config, logger: Logger) -> Self {
        let sort = config.ui.default_sort;
        Self {
            board,
            session,
            config,
            logger,
            search_term: String::new(),
            sort,
            selected_column: 0,
            selected_task: 0,
            column_offset: 0,
            drag: DragController::new(),
            drag_target: None,
            mouse_hover: None,
            dialog: None,
            error_message: None,
            status_message: None,
            loading: false,
            should_quit: false,
            logged_out: false,
            column_areas: Vec::new(),
        }
    }

    /// Columns in render order
    pub fn columns(&self) -> Vec<&Column> {
        self.board.ordered_columns()
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.board.ordered_columns().get(index).copied()
    }

    pub fn selected_column(&self) -> Option<&Column> {
        self.column_at(self.selected_column)
    }

    /// Tasks a column currently displays
    pub fn visible_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.board.tasks_in_column(column_id, &self.search_term, self.sort)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let column = self.selected_column()?;
        self.visible_tasks(&column.id).get(self.selected_task).copied()
    }

    /// Keep selection indices inside the current board and projection
    pub fn clamp_selection(&mut self) {
        let column_count = self.board.columns().len();
        if column_count == 0 {
            self.selected_column = 0;
            self.selected_task = 0;
            return;
        }
        self.selected_column = self.selected_column.min(column_count - 1);

        let task_count = self
            .selected_column()
            .map(|column| self.visible_tasks(&column.id).len())
            .unwrap_or(0);
        self.selected_task = self.selected_task.min(task_count.saturating_sub(1));
    }

    /// Render position of a column
    fn column_index(&self, column_id: &str) -> Option<usize> {
        self.board.ordered_columns().iter().position(|column| column.id == column_id)
    }

    fn select_column_id(&mut self, column_id: &str) {
        if let Some(index) = self.column_index(column_id) {
            self.selected_column = index;
        }
    }

    /// Select a task's column and, if the projection shows it, the task
    fn select_task_id(&mut self, task_id: &str) {
        let Some(column_id) = self.board.task(task_id).map(|task| task.column_id.as_str()) else {
            return;
        };
        let Some(column) = self.column_index(column_id) else {
            return;
        };
        let position = self
            .visible_tasks(column_id)
            .iter()
            .position(|task| task.id == task_id);

        self.selected_column = column;
        if let Some(index) = position {
            self.selected_task = index;
        }
    }

    pub fn next_column(&mut self) {
        let count = self.board.columns().len();
        if count > 0 && self.selected_column + 1 < count {
            self.selected_column += 1;
            self.selected_task = 0;
        }
    }

    pub fn previous_column(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_task = 0;
        }
    }

    pub fn next_task(&mut self) {
        self.selected_task += 1;
        self.clamp_selection();
    }

    pub fn previous_task(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    // ---- Messages ----

    fn report_error(&mut self, context: &str, error: &BoardError) {
        warn!("{context}: {error}");
        self.error_message = Some(if error.is_auth() {
            ERROR_SESSION_EXPIRED.to_string()
        } else {
            format!("{context}: {error}")
        });
    }

    fn flash(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn dismiss_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }

    // ---- Loading ----

    /// Fetch the whole board, keeping the previous one if anything fails
    pub async fn load_board(&mut self) {
        self.loading = true;
        match self.board.load().await {
            Ok(()) => {
                self.clamp_selection();
                info!("Board ready");
            }
            Err(e) => self.report_error(ERROR_LOAD_FAILED, &e),
        }
        self.loading = false;
    }

    // ---- Dialogs ----

    pub fn open_new_column(&mut self) {
        self.dialog = Some(Dialog::ColumnTitle {
            column_id: None,
            input: String::new(),
            error: None,
        });
    }

    pub fn open_rename_column(&mut self) {
        let dialog = self.selected_column().map(|column| Dialog::ColumnTitle {
            column_id: Some(column.id.clone()),
            input: column.title.clone(),
            error: None,
        });
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_delete_column(&mut self) {
        let dialog = self.selected_column().map(|column| {
            let task_count = self.board.tasks().iter().filter(|t| t.belongs_to(&column.id)).count();
            Dialog::ConfirmDelete(DeleteTarget::Column {
                id: column.id.clone(),
                title: column.title.clone(),
                task_count,
            })
        });
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_new_task(&mut self) {
        let dialog = self
            .selected_column()
            .map(|column| Dialog::TaskForm(TaskForm::add(&column.id)));
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_edit_task(&mut self) {
        let dialog = self.selected_task().map(|task| Dialog::TaskForm(TaskForm::edit(task)));
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_delete_task(&mut self) {
        let dialog = self.selected_task().map(|task| {
            Dialog::ConfirmDelete(DeleteTarget::Task {
                id: task.id.clone(),
                title: task.title.clone(),
            })
        });
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_task_details(&mut self) {
        let dialog = self.selected_task().map(|task| Dialog::TaskDetails {
            task_id: task.id.clone(),
        });
        if dialog.is_some() {
            self.dialog = dialog;
        }
    }

    pub fn open_search(&mut self) {
        self.dialog = Some(Dialog::Search {
            previous: self.search_term.clone(),
        });
    }

    /// Esc in the search box restores the previous term
    pub fn cancel_search(&mut self, previous: String) {
        self.search_term = previous;
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
        self.selected_task = 0;
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.search_term.pop();
        self.clamp_selection();
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
        self.clamp_selection();
        self.status_message = Some(format!("Sorted by {}", self.sort));
    }

    /// Confirm whatever dialog is open
    pub async fn submit_dialog(&mut self) {
        match self.dialog.take() {
            Some(Dialog::ColumnTitle { column_id, input, .. }) => self.submit_column_title(column_id, input).await,
            Some(Dialog::TaskForm(form)) => self.submit_task_form(form).await,
            Some(Dialog::ConfirmDelete(target)) => self.confirm_delete(target).await,
            Some(Dialog::Search { .. }) | Some(Dialog::TaskDetails { .. }) => {}
            Some(Dialog::Help { .. }) | Some(Dialog::Logs { .. }) | None => {}
        }
    }

    async fn submit_column_title(&mut self, column_id: Option<String>, input: String) {
        let title = match validate_title(&input) {
            Ok(title) => title.to_string(),
            Err(message) => {
                self.dialog = Some(Dialog::ColumnTitle {
                    column_id,
                    input,
                    error: Some(message.to_string()),
                });
                return;
            }
        };

        match column_id {
            None => match self.board.add_column(&title).await {
                Ok(column) => {
                    self.select_column_id(&column.id);
                    self.selected_task = 0;
                    self.flash(SUCCESS_COLUMN_CREATED);
                }
                Err(e) => self.report_error(ERROR_COLUMN_CREATE_FAILED, &e),
            },
            Some(id) => {
                let order = self.board.column(&id).map(|column| column.order).unwrap_or_default();
                match self.board.update_column(&id, &title, order).await {
                    Ok(_) => self.flash(SUCCESS_COLUMN_UPDATED),
                    Err(e) => self.report_error(ERROR_COLUMN_UPDATE_FAILED, &e),
                }
            }
        }
    }

    async fn submit_task_form(&mut self, mut form: TaskForm) {
        let title = match validate_title(&form.title) {
            Ok(title) => title.to_string(),
            Err(message) => {
                form.error = Some(message.to_string());
                form.focus = FormField::Title;
                self.dialog = Some(Dialog::TaskForm(form));
                return;
            }
        };
        let description = form.description.trim().to_string();

        match &form.mode {
            TaskFormMode::Add { column_id } => match self.board.add_task(&title, &description, column_id).await {
                Ok(task) => {
                    self.select_task_id(&task.id);
                    self.flash(SUCCESS_TASK_CREATED);
                }
                Err(e) => self.report_error(ERROR_TASK_CREATE_FAILED, &e),
            },
            TaskFormMode::Edit { task_id, column_id } => {
                match self.board.edit_task(task_id, &title, &description, column_id).await {
                    Ok(task) => {
                        self.select_task_id(&task.id);
                        self.flash(SUCCESS_TASK_UPDATED);
                    }
                    Err(e) => self.report_error(ERROR_TASK_UPDATE_FAILED, &e),
                }
            }
        }
    }

    async fn confirm_delete(&mut self, target: DeleteTarget) {
        match target {
            DeleteTarget::Task { id, .. } => match self.board.delete_task(&id).await {
                Ok(()) => self.flash(SUCCESS_TASK_DELETED),
                Err(e) => self.report_error(ERROR_TASK_DELETE_FAILED, &e),
            },
            DeleteTarget::Column { id, .. } => match self.board.delete_column(&id).await {
                Ok(()) => self.flash(SUCCESS_COLUMN_DELETED),
                Err(e) => self.report_error(ERROR_COLUMN_DELETE_FAILED, &e),
            },
        }
        self.clamp_selection();
    }

    pub async fn shift_column(&mut self, shift: ColumnShift) {
        let Some(column_id) = self.selected_column().map(|column| column.id.clone()) else {
            return;
        };
        match self.board.move_column(&column_id, shift).await {
            Ok(_) => self.select_column_id(&column_id),
            Err(e) => self.report_error(ERROR_COLUMN_UPDATE_FAILED, &e),
        }
    }

    // ---- Drag and drop ----

    /// Grab the selected task with the keyboard
    pub fn start_drag(&mut self) {
        let Some(column) = self.selected_column() else {
            return;
        };
        let column_id = column.id.clone();
        let Some(task) = self.selected_task() else {
            return;
        };
        let task_id = task.id.clone();

        self.drag
            .begin(task_id, DropPosition::new(column_id, self.selected_task));
        self.drag_target = Some(DragTarget {
            column: self.selected_column,
            index: self.selected_task,
        });
    }

    /// Move the keyboard drop target by whole columns and slots
    pub fn move_drag_target(&mut self, columns: isize, slots: isize) {
        let Some(mut target) = self.drag_target else {
            return;
        };
        let column_count = self.board.columns().len();
        if column_count == 0 {
            return;
        }

        let column = (target.column as isize + columns).clamp(0, column_count as isize - 1) as usize;
        target.column = column;

        let max_index = match (self.column_at(column), self.drag.source()) {
            (Some(col), Some(source)) => {
                let len = self.visible_tasks(&col.id).len();
                if col.id == source.column_id {
                    len.saturating_sub(1)
                } else {
                    len
                }
            }
            _ => 0,
        };
        target.index = (target.index as isize + slots).clamp(0, max_index as isize) as usize;
        self.drag_target = Some(target);
    }

    /// Drop the grabbed task at the keyboard target
    pub async fn drop_drag(&mut self) {
        let destination = self.drag_target.take().and_then(|target| {
            self.column_at(target.column)
                .map(|column| DropPosition::new(column.id.clone(), target.index))
        });
        let outcome = self.drag.end(destination);
        self.finish_drag(outcome).await;
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
        self.drag_target = None;
        self.mouse_hover = None;
    }

    /// Column slot under a screen position, from the last render
    pub fn hit_test(&self, x: u16, y: u16) -> Option<DropPosition> {
        let column = self.column_areas.iter().find(|c| contains(c.area, x, y))?;
        let task_count = self.visible_tasks(&column.column_id).len();
        let index = column
            .cards
            .iter()
            .position(|card| y < card.y + card.height)
            .map_or(task_count, |position| column.first_card + position);

        let index = match self.drag.source() {
            Some(source) if source.column_id == column.column_id => index.min(task_count.saturating_sub(1)),
            _ => index,
        };
        Some(DropPosition::new(column.column_id.clone(), index))
    }

    /// Mouse press: grab the card under the pointer, if any
    pub fn begin_mouse_drag(&mut self, x: u16, y: u16) -> bool {
        let Some(column) = self.column_areas.iter().find(|c| contains(c.area, x, y)) else {
            return false;
        };
        let column_id = column.column_id.clone();
        let first_card = column.first_card;
        let Some(index) = column
            .cards
            .iter()
            .position(|card| contains(*card, x, y))
            .map(|position| first_card + position)
        else {
            self.select_column_id(&column_id);
            self.clamp_selection();
            return false;
        };
        let Some(task_id) = self.visible_tasks(&column_id).get(index).map(|task| task.id.clone()) else {
            return false;
        };

        self.select_column_id(&column_id);
        self.selected_task = index;
        self.drag.begin(task_id, DropPosition::new(column_id.clone(), index));
        self.mouse_hover = Some(DropPosition::new(column_id, index));
        true
    }

    pub fn update_mouse_hover(&mut self, x: u16, y: u16) {
        if self.drag.is_dragging() {
            self.mouse_hover = self.hit_test(x, y);
        }
    }

    /// Mouse release: drop wherever the pointer is
    pub async fn end_mouse_drag(&mut self, x: u16, y: u16) {
        if !self.drag.is_dragging() {
            return;
        }
        let destination = self.hit_test(x, y);
        self.mouse_hover = None;
        let outcome = self.drag.end(destination);
        self.finish_drag(outcome).await;
    }

    async fn finish_drag(&mut self, outcome: DragOutcome) {
        self.drag_target = None;
        match &outcome {
            DragOutcome::Cancelled | DragOutcome::Unchanged => {}
            DragOutcome::Reordered { .. } => self.flash(INFO_REORDER_NOT_SAVED),
            DragOutcome::Move { task_id, .. } => match self.board.apply_drop(&outcome).await {
                Ok(_) => {
                    self.select_task_id(task_id);
                    self.flash(SUCCESS_TASK_MOVED);
                }
                Err(e) => self.report_error(ERROR_TASK_MOVE_FAILED, &e),
            },
        }
        self.clamp_selection();
    }

    // ---- Session ----

    /// Clear the persisted session and discard the board
    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.session.clear()?;
        self.board.clear();
        self.logged_out = true;
        self.should_quit = true;
        Ok(())
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
