//! Logs dialog component for displaying recent log lines

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use super::super::super::app::App;
use crate::constants::DIALOG_TITLE_LOGS;

/// Logs dialog component
pub struct LogsDialog;

impl LogsDialog {
    /// Render the logs dialog, newest line first
    pub fn render(frame: &mut Frame, app: &App, scroll: u16) {
        let area = frame.area();
        // Take 80% of the screen
        let modal_width = area.width.saturating_mul(8) / 10;
        let modal_height = area.height.saturating_mul(8) / 10;
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(modal_width)) / 2,
            y: area.y + (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(DIALOG_TITLE_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block, modal_area);

        let inner_area = modal_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });

        let logs = app.logger.get_logs();
        let items: Vec<ListItem> = if logs.is_empty() {
            vec![ListItem::new(Span::styled("No log entries yet", Style::default().fg(Color::Gray)))]
        } else {
            logs.into_iter()
                .skip(scroll as usize)
                .take(inner_area.height as usize)
                .map(|line| {
                    let color = if line.contains("ERROR") {
                        Color::Red
                    } else if line.contains("WARN") {
                        Color::Yellow
                    } else {
                        Color::White
                    };
                    ListItem::new(Line::from(Span::styled(line, Style::default().fg(color))))
                })
                .collect()
        };

        frame.render_widget(List::new(items), inner_area);
    }
}
