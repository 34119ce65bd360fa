//! Column create/rename dialog component

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::Color,
    widgets::Clear,
    Frame,
};

use super::super::super::layout::LayoutManager;
use super::common::{self, shortcuts};

/// Column title dialog component
pub struct ColumnDialog;

impl ColumnDialog {
    /// Render the column title dialog; `renaming` switches the wording
    pub fn render(f: &mut Frame, input: &str, error: Option<&str>, renaming: bool) {
        let dialog_area = LayoutManager::centered_rect_lines(50, 9, f.area());
        f.render_widget(Clear, dialog_area);

        let title = if renaming { " ✏️ Rename Column " } else { " 📋 New Column " };
        f.render_widget(common::create_dialog_block(title, Color::Cyan), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Length(1)])
            .split(dialog_area.inner(Margin {
                vertical: 1,
                horizontal: 2,
            }));

        f.render_widget(common::create_input_paragraph(input, "Title", true), chunks[0]);
        f.render_widget(common::create_error_paragraph(error), chunks[1]);
        f.render_widget(
            common::create_instructions_paragraph(&[shortcuts::ENTER_SAVE, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]),
            chunks[2],
        );
    }
}
