//! Board component: columns side by side, one card per task

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::super::app::{App, ColumnArea};
use super::super::layout::LayoutManager;
use crate::constants::{INFO_NO_COLUMNS, TASK_CARD_HEIGHT};
use crate::entities::Task;
use crate::utils::datetime::format_timestamp;

/// Card height including its border
const CARD_HEIGHT: u16 = TASK_CARD_HEIGHT + 2;

/// Board component
pub struct BoardView;

impl BoardView {
    /// Render every visible column and record their areas for mouse hit-testing
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let column_count = app.board.columns().len();
        if column_count == 0 {
            app.column_areas.clear();
            let empty = Paragraph::new(INFO_NO_COLUMNS)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Board ")
                        .title_alignment(Alignment::Center),
                )
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let width = app.config.ui.column_width;
        let visible = LayoutManager::visible_column_count(area.width, width);
        app.column_offset = LayoutManager::column_offset(app.column_offset, app.selected_column, visible, column_count);

        let offset = app.column_offset;
        let rects = LayoutManager::board_columns(area, width, visible.min(column_count - offset));

        let view: &App = app;
        let column_areas: Vec<ColumnArea> = rects
            .into_iter()
            .enumerate()
            .filter_map(|(slot, rect)| Self::render_column(f, rect, view, offset + slot))
            .collect();
        app.column_areas = column_areas;
    }

    fn render_column(f: &mut Frame, area: Rect, app: &App, index: usize) -> Option<ColumnArea> {
        let column = app.column_at(index)?;
        let tasks = app.visible_tasks(&column.id);
        let is_selected = index == app.selected_column;
        let drop_index = Self::drop_index(app, index, &column.id);

        let border_style = if drop_index.is_some() {
            Style::default().fg(Color::Yellow)
        } else if is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ({}) ", column.title, tasks.len()))
            .title_alignment(Alignment::Center)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Scroll so the selected card stays in view
        let capacity = (inner.height / CARD_HEIGHT).max(1) as usize;
        let focus = match drop_index {
            Some(target) => target,
            None if is_selected => app.selected_task,
            None => 0,
        };
        let first_card = if focus >= capacity { focus + 1 - capacity } else { 0 };

        let dragged = app.drag.dragged_task_id();
        let mut cards = Vec::new();
        for (position, task) in tasks.iter().enumerate().skip(first_card).take(capacity) {
            let y = inner.y + (cards.len() as u16) * CARD_HEIGHT;
            let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT.min(inner.y + inner.height - y));

            let state = CardState {
                selected: is_selected && position == app.selected_task && !app.drag.is_dragging(),
                dragged: dragged == Some(task.id.as_str()),
                drop_target: drop_index == Some(position),
            };
            Self::render_card(f, card_area, app, task, state);
            cards.push(card_area);
        }

        // Dropping after the last card
        if drop_index == Some(tasks.len()) {
            let y = inner.y + (cards.len() as u16) * CARD_HEIGHT;
            if y < inner.y + inner.height {
                let marker = Paragraph::new("── drop here ──")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center);
                f.render_widget(marker, Rect::new(inner.x, y, inner.width, 1));
            }
        }

        Some(ColumnArea {
            column_id: column.id.clone(),
            area,
            first_card,
            cards,
        })
    }

    /// Where a grabbed task would land in this column, if it is the current target
    fn drop_index(app: &App, index: usize, column_id: &str) -> Option<usize> {
        if !app.drag.is_dragging() {
            return None;
        }
        if let Some(target) = app.drag_target {
            return (target.column == index).then_some(target.index);
        }
        app.mouse_hover
            .as_ref()
            .filter(|hover| hover.column_id == column_id)
            .map(|hover| hover.index)
    }

    fn render_card(f: &mut Frame, area: Rect, app: &App, task: &Task, state: CardState) {
        let border_style = if state.drop_target {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if state.selected {
            Style::default().fg(Color::Cyan)
        } else if state.dragged {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut title_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        if state.dragged {
            title_style = title_style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
        }
        let title_prefix = if state.dragged { "⇄ " } else { "" };

        let mut lines = vec![Line::from(Span::styled(format!("{title_prefix}{}", task.title), title_style))];
        if app.config.display.show_descriptions && !task.description.is_empty() {
            let first_line = task.description.lines().next().unwrap_or_default();
            lines.push(Line::from(Span::styled(
                first_line.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(Span::styled(
            format_timestamp(&task.created_at, &app.config.display.datetime_format),
            Style::default().fg(Color::DarkGray),
        )));

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
        f.render_widget(card, area);
    }
}

#[derive(Debug, Clone, Copy)]
struct CardState {
    selected: bool,
    dragged: bool,
    drop_target: bool,
}
