//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Calculate the main layout areas (board on top, status bar below)
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        let board_height = area.height.saturating_sub(1);
        let board_area = Rect::new(area.x, area.y, area.width, board_height);
        let status_area = Rect::new(area.x, area.y + board_height, area.width, area.height.min(1));

        vec![board_area, status_area]
    }

    /// How many columns of `column_width` fit side by side
    #[must_use]
    pub fn visible_column_count(board_width: u16, column_width: u16) -> usize {
        (board_width / column_width.max(1)).max(1) as usize
    }

    /// First column to draw so that `selected` stays on screen
    #[must_use]
    pub fn column_offset(current_offset: usize, selected: usize, visible: usize, total: usize) -> usize {
        let visible = visible.max(1);
        let mut offset = current_offset.min(total.saturating_sub(visible));
        if selected < offset {
            offset = selected;
        } else if selected >= offset + visible {
            offset = selected + 1 - visible;
        }
        offset
    }

    /// Split the board area into side-by-side column areas
    #[must_use]
    pub fn board_columns(area: Rect, column_width: u16, count: usize) -> Vec<Rect> {
        let width = column_width.min(area.width.max(1));
        (0..count)
            .map(|i| {
                let x = area.x + (i as u16).saturating_mul(width);
                Rect::new(x, area.y, width.min((area.x + area.width).saturating_sub(x)), area.height)
            })
            .collect()
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Calculate a centered rectangle with percentage width and fixed line height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height_lines),
                Constraint::Min(0),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Calculate help panel dimensions based on screen size
    #[must_use]
    pub fn help_panel_dimensions(screen_width: u16, screen_height: u16) -> (u16, u16) {
        let help_width = if screen_width < 80 { 70 } else { 60 };
        let help_height = if screen_height < 40 { 80 } else { 70 };
        (help_width, help_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_selection() {
        assert_eq!(LayoutManager::column_offset(0, 0, 3, 10), 0);
        assert_eq!(LayoutManager::column_offset(0, 4, 3, 10), 2);
        assert_eq!(LayoutManager::column_offset(5, 1, 3, 10), 1);
        assert_eq!(LayoutManager::column_offset(9, 9, 3, 10), 7);
    }

    #[test]
    fn columns_are_laid_out_left_to_right() {
        let areas = LayoutManager::board_columns(Rect::new(0, 0, 100, 20), 30, 3);
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[1].x, 30);
        assert_eq!(areas[2].width, 30);
    }
}
