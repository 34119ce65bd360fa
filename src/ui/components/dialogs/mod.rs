//! Dialog components module

pub mod common;
mod column_dialog;
mod delete_confirmation_dialog;
mod error_dialog;
mod logs_dialog;
mod search_dialog;
mod task_details_dialog;
mod task_form_dialog;

pub use column_dialog::ColumnDialog;
pub use delete_confirmation_dialog::DeleteConfirmationDialog;
pub use error_dialog::ErrorDialog;
pub use logs_dialog::LogsDialog;
pub use search_dialog::SearchDialog;
pub use task_details_dialog::TaskDetailsDialog;
pub use task_form_dialog::TaskFormDialog;
