//! Help panel component

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::layout::LayoutManager;

const HELP_CONTENT: &str = r"
TASKBOARD - Terminal Kanban Board
=================================

NAVIGATION
----------
h/l ←→      Previous/next column
j/k ↑↓      Previous/next task
Enter       Show task details
Esc         Cancel action or close dialogs

TASKS
-----
a           Add task to the selected column
e           Edit selected task
d           Delete selected task (with confirmation)
m           Grab task, then ←→↑↓ to choose a target
            and Enter to drop it (Esc cancels)
Mouse       Drag a card onto another column

COLUMNS
-------
C           Create column
R           Rename selected column
D           Delete selected column and its tasks
< >         Shift selected column left/right

VIEW
----
/           Search tasks by title or description
s           Toggle sort (recent / oldest)
r           Reload board from the server
L           Show logs ('c' clears them)

SESSION
-------
X           Log out and quit
q           Quit application
Ctrl+C      Quit application

NOTES
-----
Ordering within a column is not saved; only moves
between columns reach the server.

Press 'Esc' or '?' to close this help panel
";

/// Help panel component
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel
    pub fn render(f: &mut Frame, scroll: u16) {
        let screen = f.area();
        let (help_width, help_height) = LayoutManager::help_panel_dimensions(screen.width, screen.height);
        let help_area = LayoutManager::centered_rect(help_width, help_height, screen);
        f.render_widget(Clear, help_area);

        let lines: Vec<&str> = HELP_CONTENT.lines().collect();
        let total_lines = lines.len();
        let visible_height = help_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset to valid range
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll_offset = (scroll as usize).min(max_scroll);

        let help_text = lines
            .iter()
            .skip(scroll_offset)
            .take(visible_height)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let help_paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("❓ Help - {}/{} lines", scroll_offset + 1, total_lines))
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        f.render_widget(help_paragraph, help_area);
    }
}
