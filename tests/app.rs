mod support;

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use support::{task, MockBackend};
use taskboard::backend::ApiError;
use taskboard::board::BoardStore;
use taskboard::config::Config;
use taskboard::constants::{ERROR_SESSION_EXPIRED, INFO_REORDER_NOT_SAVED, SUCCESS_TASK_MOVED};
use taskboard::entities::Column;
use taskboard::logger::Logger;
use taskboard::session::Session;
use taskboard::ui::app::{ColumnArea, Dialog};
use taskboard::ui::renderer::render_ui;
use taskboard::ui::{handle_events, App};
use tempfile::TempDir;

async fn loaded_app(backend: &MockBackend, dir: &TempDir) -> App {
    let mut session = Session::load(dir.path().join("session.json")).unwrap();
    session.store("abc", "u1").unwrap();

    let board = BoardStore::new(Arc::new(backend.clone()));
    let mut app = App::new(board, session, Config::default(), Logger::new());
    app.load_board().await;
    backend.clear_calls();
    app
}

fn sample_board() -> MockBackend {
    MockBackend::with_board(
        vec![Column::new("c1", "Todo", 0), Column::new("c2", "Doing", 1)],
        vec![
            task("t1", "Buy milk", "", "c1", 1),
            task("t2", "Eggs", "", "c1", 2),
            task("t3", "Report", "", "c2", 3),
        ],
    )
}

async fn press(app: &mut App, code: KeyCode) {
    handle_events(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), app)
        .await
        .unwrap();
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

#[tokio::test]
async fn test_keyboard_drag_moves_task_to_other_column() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    // Newest first: t2 is selected
    assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("t2"));

    press(&mut app, KeyCode::Char('m')).await;
    assert!(app.drag.is_dragging());
    press(&mut app, KeyCode::Right).await;
    press(&mut app, KeyCode::Enter).await;

    assert!(!app.drag.is_dragging());
    assert_eq!(backend.calls(), vec!["update_task t2 c2"]);
    assert_eq!(app.board.task("t2").map(|t| t.column_id.as_str()), Some("c2"));
    assert_eq!(app.selected_column, 1);
    // The moved task stays selected in its new column
    assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("t2"));
    assert_eq!(app.status_message.as_deref(), Some(SUCCESS_TASK_MOVED));
}

#[tokio::test]
async fn test_reorder_within_column_is_not_saved() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    let before = app.board.tasks().to_vec();

    press(&mut app, KeyCode::Char('m')).await;
    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Enter).await;

    assert!(backend.calls().is_empty());
    assert_eq!(app.board.tasks(), before.as_slice());
    assert_eq!(app.status_message.as_deref(), Some(INFO_REORDER_NOT_SAVED));
}

#[tokio::test]
async fn test_escape_cancels_drag() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('m')).await;
    press(&mut app, KeyCode::Right).await;
    press(&mut app, KeyCode::Esc).await;

    assert!(!app.drag.is_dragging());
    assert!(app.drag_target.is_none());
    assert!(backend.calls().is_empty());
    assert!(!app.should_quit);
}

#[tokio::test]
async fn test_empty_title_is_rejected_before_any_request() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('a')).await;
    press(&mut app, KeyCode::Enter).await;

    match &app.dialog {
        Some(Dialog::TaskForm(form)) => assert!(form.error.is_some()),
        other => panic!("expected task form, got {other:?}"),
    }
    assert!(backend.calls().is_empty());

    type_text(&mut app, "Call mom").await;
    press(&mut app, KeyCode::Enter).await;

    assert!(app.dialog.is_none());
    assert_eq!(backend.calls(), vec!["create_task Call mom c1"]);
    assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Call mom"));
}

#[tokio::test]
async fn test_search_filters_and_escape_restores() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('/')).await;
    type_text(&mut app, "MILK").await;
    assert_eq!(app.search_term, "MILK");
    let visible: Vec<&str> = app.visible_tasks("c1").iter().map(|t| t.id.as_str()).collect();
    assert_eq!(visible, vec!["t1"]);

    press(&mut app, KeyCode::Esc).await;
    assert!(app.search_term.is_empty());
    assert_eq!(app.visible_tasks("c1").len(), 2);
}

#[tokio::test]
async fn test_sort_toggle_reverses_column() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('s')).await;
    let visible: Vec<&str> = app.visible_tasks("c1").iter().map(|t| t.id.as_str()).collect();
    assert_eq!(visible, vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_failed_request_shows_error_and_keeps_board() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    let before = app.board.tasks().to_vec();

    backend.fail_with(ApiError::Network("connection refused".to_string()));
    press(&mut app, KeyCode::Char('d')).await;
    press(&mut app, KeyCode::Char('y')).await;

    assert!(app.error_message.is_some());
    assert_eq!(app.board.tasks(), before.as_slice());

    // Any key dismisses the error
    press(&mut app, KeyCode::Char('j')).await;
    assert!(app.error_message.is_none());
}

#[tokio::test]
async fn test_auth_failure_asks_to_log_in_again() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    backend.fail_with(ApiError::Unauthorized("jwt expired".to_string()));
    press(&mut app, KeyCode::Char('r')).await;

    assert_eq!(app.error_message.as_deref(), Some(ERROR_SESSION_EXPIRED));
    assert_eq!(app.board.tasks().len(), 3);
}

#[tokio::test]
async fn test_delete_column_via_confirmation() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('D')).await;
    assert!(matches!(app.dialog, Some(Dialog::ConfirmDelete(_))));
    press(&mut app, KeyCode::Char('y')).await;

    assert_eq!(backend.calls(), vec!["delete_column c1"]);
    assert_eq!(app.board.columns().len(), 1);
    assert_eq!(app.board.tasks().len(), 1);
    assert_eq!(app.selected_column, 0);
}

#[tokio::test]
async fn test_logout_clears_session_and_quits() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    press(&mut app, KeyCode::Char('X')).await;

    assert!(app.logged_out);
    assert!(app.should_quit);
    assert!(!app.session.is_authenticated());
    assert!(app.board.tasks().is_empty());
    assert!(!dir.path().join("session.json").exists());
}

async fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
    let event = MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    handle_events(Event::Mouse(event), app).await.unwrap();
}

/// Two columns side by side: c1 shows t2 then t1, c2 shows t3
fn lay_out_columns(app: &mut App) {
    app.column_areas = vec![
        ColumnArea {
            column_id: "c1".to_string(),
            area: Rect::new(0, 0, 30, 20),
            first_card: 0,
            cards: vec![Rect::new(1, 1, 28, 5), Rect::new(1, 6, 28, 5)],
        },
        ColumnArea {
            column_id: "c2".to_string(),
            area: Rect::new(30, 0, 30, 20),
            first_card: 0,
            cards: vec![Rect::new(31, 1, 28, 5)],
        },
    ];
}

#[tokio::test]
async fn test_mouse_drag_to_other_column_moves_task() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    lay_out_columns(&mut app);

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2).await;
    assert_eq!(app.drag.dragged_task_id(), Some("t2"));

    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 40, 15).await;
    assert_eq!(app.mouse_hover.as_ref().map(|hover| hover.column_id.as_str()), Some("c2"));

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 40, 15).await;

    assert!(!app.drag.is_dragging());
    assert!(app.mouse_hover.is_none());
    assert_eq!(backend.calls(), vec!["update_task t2 c2"]);
    assert_eq!(app.status_message.as_deref(), Some(SUCCESS_TASK_MOVED));
}

#[tokio::test]
async fn test_mouse_drop_below_last_card_of_own_column_is_unchanged() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    lay_out_columns(&mut app);
    let before = app.board.tasks().to_vec();

    // Grab the last card, release in the empty space under it
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 7).await;
    assert_eq!(app.drag.dragged_task_id(), Some("t1"));
    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 16).await;

    assert!(backend.calls().is_empty());
    assert_eq!(app.board.tasks(), before.as_slice());
    // Unchanged, not a reorder
    assert_eq!(app.status_message, None);
}

#[tokio::test]
async fn test_mouse_drop_outside_columns_is_cancelled() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    lay_out_columns(&mut app);

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2).await;
    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 70, 5).await;

    assert!(!app.drag.is_dragging());
    assert!(backend.calls().is_empty());
    assert_eq!(app.board.task("t2").map(|t| t.column_id.as_str()), Some("c1"));
}

#[tokio::test]
async fn test_mouse_grab_in_scrolled_column_uses_offset() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    lay_out_columns(&mut app);
    // c1 scrolled by one: its only drawn card is t1
    app.column_areas[0].first_card = 1;
    app.column_areas[0].cards = vec![Rect::new(1, 1, 28, 5)];

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2).await;
    assert_eq!(app.drag.dragged_task_id(), Some("t1"));
    assert_eq!(app.selected_task, 1);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 35, 3).await;
    assert_eq!(backend.calls(), vec!["update_task t1 c2"]);
}

#[tokio::test]
async fn test_logs_dialog_clears_buffer() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;
    app.logger.push("INFO  Board ready".to_string());

    press(&mut app, KeyCode::Char('L')).await;
    press(&mut app, KeyCode::Char('c')).await;

    assert!(app.logger.get_logs().is_empty());
    assert!(matches!(app.dialog, Some(Dialog::Logs { scroll: 0 })));
}

#[tokio::test]
async fn test_render_shows_columns_and_signed_in_user() {
    let backend = sample_board();
    let dir = TempDir::new().unwrap();
    let mut app = loaded_app(&backend, &dir).await;

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| render_ui(f, &mut app)).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Todo (2)"));
    assert!(screen.contains("Doing (1)"));
    assert!(screen.contains("u1"));

    // Rendering records where each column and card is
    assert_eq!(app.column_areas.len(), 2);
    assert_eq!(app.column_areas[0].cards.len(), 2);
}
