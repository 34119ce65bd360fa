//! Main UI rendering and coordination

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::Duration;

use super::app::{App, Dialog};
use super::components::{
    dialogs::{
        ColumnDialog, DeleteConfirmationDialog, ErrorDialog, LogsDialog, SearchDialog, TaskDetailsDialog,
        TaskFormDialog,
    },
    BoardView, HelpPanel, StatusBar,
};
use super::events::handle_events;
use super::layout::LayoutManager;

/// Run the board until the user quits, returning the final state
pub async fn run_app(mut app: App) -> Result<App> {
    let mouse = app.config.ui.mouse_enabled;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Show the loading state while the first fetch runs
    app.loading = true;
    terminal.draw(|f| render_ui(f, &mut app))?;
    app.load_board().await;

    let res = run_ui(&mut terminal, &mut app).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    res.map(|()| app)
}

/// Main UI loop
async fn run_ui(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_events(event, app).await?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Main UI rendering function
pub fn render_ui(f: &mut ratatui::Frame, app: &mut App) {
    let chunks = LayoutManager::main_layout(f.area());

    BoardView::render(f, chunks[0], app);
    StatusBar::render(f, chunks[1], app);

    match &app.dialog {
        Some(Dialog::ColumnTitle { column_id, input, error }) => {
            ColumnDialog::render(f, input, error.as_deref(), column_id.is_some());
        }
        Some(Dialog::TaskForm(form)) => TaskFormDialog::render(f, app, form),
        Some(Dialog::ConfirmDelete(target)) => DeleteConfirmationDialog::render(f, target),
        Some(Dialog::TaskDetails { task_id }) => TaskDetailsDialog::render(f, app, task_id),
        Some(Dialog::Search { .. }) => SearchDialog::render(f, chunks[0], &app.search_term),
        Some(Dialog::Help { scroll }) => HelpPanel::render(f, *scroll),
        Some(Dialog::Logs { scroll }) => LogsDialog::render(f, app, *scroll),
        None => {}
    }

    // Errors sit on top of everything
    if let Some(error_msg) = &app.error_message {
        ErrorDialog::render(f, error_msg);
    }
}
