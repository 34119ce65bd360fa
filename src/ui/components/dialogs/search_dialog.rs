//! Search box component

use ratatui::{layout::Rect, widgets::Clear, Frame};

use super::common;

/// Search box component, drawn over the bottom of the board
pub struct SearchDialog;

impl SearchDialog {
    /// Render the search box just above the status bar
    pub fn render(f: &mut Frame, board_area: Rect, search_term: &str) {
        let height = 3.min(board_area.height);
        let area = Rect::new(
            board_area.x,
            board_area.y + board_area.height - height,
            board_area.width,
            height,
        );
        f.render_widget(Clear, area);
        f.render_widget(
            common::create_input_paragraph(search_term, "🔍 Search (Enter: keep • Esc: cancel)", true),
            area,
        );
    }
}
