//! UI components module

pub mod board;
pub mod dialogs;
pub mod help_panel;
pub mod status_bar;

pub use board::BoardView;
pub use help_panel::HelpPanel;
pub use status_bar::StatusBar;
