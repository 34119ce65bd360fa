//! Utility modules for the Taskboard application.
//!
//! - [`datetime`] - Timestamp formatting for task cards and details

pub mod datetime;
