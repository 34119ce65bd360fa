//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::app::App;

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let (status_text, status_color) = if app.loading {
            ("🔄 Loading board...".to_string(), Color::Yellow)
        } else if app.drag.is_dragging() {
            let title = app
                .drag
                .dragged_task_id()
                .and_then(|id| app.board.task(id))
                .map(|task| task.title.as_str())
                .unwrap_or_default();
            (
                format!("Moving \"{title}\" • ←→↑↓: target • Enter: drop • Esc: cancel"),
                Color::Yellow,
            )
        } else if let Some(message) = &app.status_message {
            (message.clone(), Color::Green)
        } else {
            (
                "a: add • e: edit • d: delete • m: move • C: column • /: search • s: sort • ?: help • q: quit"
                    .to_string(),
                Color::Gray,
            )
        };

        let mut spans = vec![Span::styled(
            format!(" Sort: {} ", app.sort),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )];
        if !app.search_term.is_empty() {
            spans.push(Span::styled(
                format!(" 🔍 {} ", app.search_term),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
        }
        if let Some(user_id) = app.session.user_id() {
            spans.push(Span::styled(format!(" 👤 {user_id} "), Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(status_text, Style::default().fg(status_color)));

        let status_bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
        f.render_widget(status_bar, area);
    }
}
