//! Board entities as the rest of the application sees them.
//!
//! These are normalized models: wire quirks (the `_id` field name, column
//! references that may arrive expanded) are resolved in [`crate::backend`]
//! before values reach this module.

pub mod column;
pub mod task;

pub use column::Column;
pub use task::Task;
