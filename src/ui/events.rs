//! Event handling and key bindings

use super::app::{App, Dialog};
use crate::board::ColumnShift;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle one terminal event. Returns whether anything changed.
pub async fn handle_events(event: Event, app: &mut App) -> Result<bool, anyhow::Error> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app).await,
        Event::Mouse(mouse) if app.config.ui.mouse_enabled => Ok(handle_mouse(mouse, app).await),
        Event::Resize(_, _) => Ok(true),
        _ => Ok(false),
    }
}

async fn handle_key(key: KeyEvent, app: &mut App) -> Result<bool, anyhow::Error> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(true);
    }

    // Error dialog swallows the next key
    if app.error_message.is_some() {
        app.error_message = None;
        return Ok(true);
    }
    app.status_message = None;

    if app.dialog.is_some() {
        return Ok(handle_dialog_key(key, app).await);
    }

    if app.drag.is_dragging() {
        return Ok(handle_drag_key(key, app).await);
    }

    handle_normal_mode(key, app).await
}

/// Keys while a task is grabbed with the keyboard
async fn handle_drag_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_drag_target(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_drag_target(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_drag_target(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_drag_target(0, 1),
        KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char(' ') => app.drop_drag().await,
        KeyCode::Esc => app.cancel_drag(),
        _ => return false,
    }
    true
}

async fn handle_normal_mode(key: KeyEvent, app: &mut App) -> Result<bool, anyhow::Error> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Navigation
        KeyCode::Left | KeyCode::Char('h') => app.previous_column(),
        KeyCode::Right | KeyCode::Char('l') => app.next_column(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_task(),
        KeyCode::Down | KeyCode::Char('j') => app.next_task(),

        // Tasks
        KeyCode::Char('a') => app.open_new_task(),
        KeyCode::Char('e') => app.open_edit_task(),
        KeyCode::Char('d') => app.open_delete_task(),
        KeyCode::Enter => app.open_task_details(),
        KeyCode::Char('m') => app.start_drag(),

        // Columns
        KeyCode::Char('C') => app.open_new_column(),
        KeyCode::Char('R') => app.open_rename_column(),
        KeyCode::Char('D') => app.open_delete_column(),
        KeyCode::Char('<') => app.shift_column(ColumnShift::Left).await,
        KeyCode::Char('>') => app.shift_column(ColumnShift::Right).await,

        // View
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('r') => app.load_board().await,
        KeyCode::Char('L') => app.dialog = Some(Dialog::Logs { scroll: 0 }),
        KeyCode::Char('?') => app.dialog = Some(Dialog::Help { scroll: 0 }),

        // Session
        KeyCode::Char('X') => app.logout()?,

        _ => return Ok(false),
    }
    Ok(true)
}

async fn handle_dialog_key(key: KeyEvent, app: &mut App) -> bool {
    let Some(dialog) = app.dialog.as_mut() else {
        return false;
    };

    match dialog {
        Dialog::ColumnTitle { input, error, .. } => match key.code {
            KeyCode::Enter => app.submit_dialog().await,
            KeyCode::Esc => app.dialog = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                input.push(c);
                *error = None;
            }
            _ => return false,
        },

        Dialog::TaskForm(form) => match key.code {
            KeyCode::Enter => app.submit_dialog().await,
            KeyCode::Esc => app.dialog = None,
            KeyCode::Tab | KeyCode::BackTab => form.toggle_focus(),
            KeyCode::Backspace => {
                form.focused_input().pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                form.focused_input().push(c);
                form.error = None;
            }
            _ => return false,
        },

        Dialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y' | 'Y') => app.submit_dialog().await,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.dialog = None,
            _ => return false,
        },

        Dialog::Search { previous } => match key.code {
            KeyCode::Enter => app.dialog = None,
            KeyCode::Esc => {
                let previous = std::mem::take(previous);
                app.dialog = None;
                app.cancel_search(previous);
            }
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
            _ => return false,
        },

        Dialog::TaskDetails { .. } => match key.code {
            KeyCode::Char('e') => {
                app.dialog = None;
                app.open_edit_task();
            }
            KeyCode::Char('d') => {
                app.dialog = None;
                app.open_delete_task();
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.dialog = None,
            _ => return false,
        },

        Dialog::Logs { scroll } if key.code == KeyCode::Char('c') => {
            app.logger.clear();
            *scroll = 0;
        }

        Dialog::Help { scroll } | Dialog::Logs { scroll } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::Home => *scroll = 0,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?' | 'L') => app.dialog = None,
            _ => return false,
        },
    }
    true
}

async fn handle_mouse(mouse: MouseEvent, app: &mut App) -> bool {
    if app.dialog.is_some() || app.error_message.is_some() {
        return false;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.status_message = None;
            app.begin_mouse_drag(mouse.column, mouse.row);
            true
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.update_mouse_hover(mouse.column, mouse.row);
            true
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_mouse_drag(mouse.column, mouse.row).await;
            true
        }
        MouseEventKind::ScrollDown => {
            app.next_task();
            true
        }
        MouseEventKind::ScrollUp => {
            app.previous_task();
            true
        }
        _ => false,
    }
}
