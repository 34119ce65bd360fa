//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Environment
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";
pub const PASSWORD_ENV: &str = "TASKBOARD_PASSWORD";

// Success Messages
pub const SUCCESS_COLUMN_CREATED: &str = "✅ Column created";
pub const SUCCESS_COLUMN_UPDATED: &str = "✅ Column renamed";
pub const SUCCESS_COLUMN_DELETED: &str = "✅ Column deleted";
pub const SUCCESS_TASK_CREATED: &str = "✅ Task created";
pub const SUCCESS_TASK_UPDATED: &str = "✅ Task updated";
pub const SUCCESS_TASK_DELETED: &str = "✅ Task deleted";
pub const SUCCESS_TASK_MOVED: &str = "✅ Task moved";
pub const SUCCESS_LOGGED_IN: &str = "✅ Logged in";
pub const SUCCESS_LOGGED_OUT: &str = "✅ Logged out";
pub const SUCCESS_REGISTERED: &str = "✅ Account registered, you can now log in";

// Error Messages
pub const ERROR_LOAD_FAILED: &str = "❌ Failed to load board";
pub const ERROR_COLUMN_CREATE_FAILED: &str = "❌ Failed to create column";
pub const ERROR_COLUMN_UPDATE_FAILED: &str = "❌ Failed to update column";
pub const ERROR_COLUMN_DELETE_FAILED: &str = "❌ Failed to delete column";
pub const ERROR_TASK_CREATE_FAILED: &str = "❌ Failed to create task";
pub const ERROR_TASK_UPDATE_FAILED: &str = "❌ Failed to update task";
pub const ERROR_TASK_DELETE_FAILED: &str = "❌ Failed to delete task";
pub const ERROR_TASK_MOVE_FAILED: &str = "❌ Failed to move task";
pub const ERROR_SESSION_EXPIRED: &str = "❌ Your session is no longer valid. Run `taskboard login` again.";
pub const ERROR_NOT_LOGGED_IN: &str = "❌ Not logged in. Run `taskboard login --email <email>` first.";
pub const ERROR_LOGIN_FAILED: &str = "❌ Invalid email or password";
pub const ERROR_CALLBACK_INCOMPLETE: &str = "❌ Authentication callback is missing token or userId. Please log in.";

// Info Messages
pub const INFO_REORDER_NOT_SAVED: &str = "ℹ️  Ordering within a column is not saved";
pub const INFO_NO_COLUMNS: &str = "No columns yet. Press 'C' to add one.";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - 'c' to clear, 'Esc' or 'q' to close";

// Display
/// Creation timestamp format, day first as on the web board
pub const DEFAULT_DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// UI Layout Constants
/// Minimum column width in cells
pub const COLUMN_MIN_WIDTH: u16 = 20;
/// Maximum column width in cells
pub const COLUMN_MAX_WIDTH: u16 = 80;
/// Default column width in cells
pub const COLUMN_DEFAULT_WIDTH: u16 = 32;
/// Height of one task card (title, description, timestamp)
pub const TASK_CARD_HEIGHT: u16 = 3;
/// Maximum number of in-memory log lines kept for the logs dialog
pub const LOG_BUFFER_CAPACITY: usize = 500;
