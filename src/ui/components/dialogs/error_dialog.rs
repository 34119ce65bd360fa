//! Error dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::super::layout::LayoutManager;

/// Error dialog component
pub struct ErrorDialog;

impl ErrorDialog {
    /// Render the error dialog
    pub fn render(f: &mut Frame, error_msg: &str) {
        let error_area = LayoutManager::centered_rect(60, 20, f.area());
        f.render_widget(Clear, error_area);
        let error_paragraph = Paragraph::new(format!("{error_msg}\n\nPress any key to continue"))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(error_paragraph, error_area);
    }
}
