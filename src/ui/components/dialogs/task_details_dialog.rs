//! Task details dialog component

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;
use super::common::{self, shortcuts};
use crate::utils::datetime::{format_relative, format_timestamp};

/// Task details dialog component
pub struct TaskDetailsDialog;

impl TaskDetailsDialog {
    /// Render the task details dialog; nothing is drawn if the task is gone
    pub fn render(f: &mut Frame, app: &App, task_id: &str) {
        let Some(task) = app.board.task(task_id) else {
            return;
        };

        let dialog_area = LayoutManager::centered_rect(60, 50, f.area());
        f.render_widget(Clear, dialog_area);
        f.render_widget(common::create_dialog_block(" 📄 Task ", Color::Cyan), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(dialog_area.inner(Margin {
                vertical: 1,
                horizontal: 2,
            }));

        let label = Style::default().fg(Color::Gray);
        let column_title = app
            .board
            .column(&task.column_id)
            .map_or("(missing column)", |column| column.title.as_str());
        let created = format!(
            "{} ({})",
            format_timestamp(&task.created_at, &app.config.display.datetime_format),
            format_relative(&task.created_at, &Utc::now())
        );

        let mut lines = vec![
            Line::from(Span::styled(
                task.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("Column:  ", label), Span::raw(column_title.to_string())]),
            Line::from(vec![Span::styled("Created: ", label), Span::raw(created)]),
            Line::from(""),
        ];
        if task.description.is_empty() {
            lines.push(Line::from(Span::styled("No description", label.add_modifier(Modifier::ITALIC))));
        } else {
            lines.extend(task.description.lines().map(|line| Line::from(line.to_string())));
        }

        f.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: false }),
            chunks[0],
        );
        f.render_widget(
            common::create_instructions_paragraph(&[
                ("e", Color::Yellow, " Edit"),
                shortcuts::SEPARATOR,
                ("d", Color::Red, " Delete"),
                shortcuts::SEPARATOR,
                shortcuts::ESC_CLOSE,
            ]),
            chunks[1],
        );
    }
}
