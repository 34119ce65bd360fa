//! Delete confirmation dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::super::app::DeleteTarget;
use super::super::super::layout::LayoutManager;

/// Delete confirmation dialog component
pub struct DeleteConfirmationDialog;

impl DeleteConfirmationDialog {
    /// Render the delete confirmation dialog
    pub fn render(f: &mut Frame, target: &DeleteTarget) {
        let confirm_area = LayoutManager::centered_rect(60, 30, f.area());
        f.render_widget(Clear, confirm_area);

        let confirm_text = match target {
            DeleteTarget::Task { title, .. } => format!(
                "Delete task?\n\n\"{}\"\n\nThis action cannot be undone!\n\nPress 'y' to confirm or 'n'/Esc to cancel",
                preview(title)
            ),
            DeleteTarget::Column { title, task_count, .. } => format!(
                "Delete column?\n\n\"{}\"\n\nIts {task_count} task(s) will be deleted too. This action cannot be undone!\n\nPress 'y' to confirm or 'n'/Esc to cancel",
                preview(title)
            ),
        };

        let confirm_paragraph = Paragraph::new(confirm_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("⚠️  Confirm Delete")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(confirm_paragraph, confirm_area);
    }
}

fn preview(title: &str) -> String {
    if title.chars().count() > 40 {
        format!("{}...", title.chars().take(37).collect::<String>())
    } else {
        title.to_string()
    }
}
