//! Task add/edit dialog component

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::Color,
    widgets::{Clear, Paragraph},
    Frame,
};

use super::super::super::app::{App, FormField, TaskForm, TaskFormMode};
use super::super::super::layout::LayoutManager;
use super::common::{self, shortcuts};

/// Task form dialog component
pub struct TaskFormDialog;

impl TaskFormDialog {
    /// Render the task form dialog
    pub fn render(f: &mut Frame, app: &App, form: &TaskForm) {
        let dialog_area = LayoutManager::centered_rect_lines(60, 14, f.area());
        f.render_widget(Clear, dialog_area);

        let (title, color) = if form.is_edit() {
            (" ✏️ Edit Task ", Color::Yellow)
        } else {
            (" 📝 New Task ", Color::Green)
        };
        f.render_widget(common::create_dialog_block(title, color), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(dialog_area.inner(Margin {
                vertical: 1,
                horizontal: 2,
            }));

        let column_id = match &form.mode {
            TaskFormMode::Add { column_id } | TaskFormMode::Edit { column_id, .. } => column_id,
        };
        let column_title = app
            .board
            .column(column_id)
            .map_or("(missing column)", |column| column.title.as_str());
        f.render_widget(Paragraph::new(format!("Column: {column_title}")), chunks[0]);

        f.render_widget(
            common::create_input_paragraph(&form.title, "Title", form.focus == FormField::Title),
            chunks[1],
        );
        f.render_widget(
            common::create_input_paragraph(&form.description, "Description", form.focus == FormField::Description),
            chunks[2],
        );
        f.render_widget(common::create_error_paragraph(form.error.as_deref()), chunks[3]);
        f.render_widget(
            common::create_instructions_paragraph(&[
                shortcuts::ENTER_SAVE,
                shortcuts::SEPARATOR,
                shortcuts::TAB_SWITCH,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]),
            chunks[4],
        );
    }
}
