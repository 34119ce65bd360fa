//! Taskboard - A terminal kanban board client
//!
//! This library provides a terminal interface for a REST task backend:
//! columns and tasks are fetched from the server, kept in an in-memory
//! board store, and changed only after the server confirms each request.
//!
//! # Modules
//!
//! * [`backend`] - REST API client and wire types
//! * [`board`] - Board state store, search/sort projection and drag controller
//! * [`config`] - Application configuration management
//! * [`session`] - Persisted login session
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// REST API client behind the `Backend` trait
pub mod backend;

/// In-memory board state and the pure helpers around it
pub mod board;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Column and task models
pub mod entities;

/// Logging setup and the in-memory log buffer
pub mod logger;

/// Session file holding the bearer token and user id
pub mod session;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;

pub use entities::{Column, Task};
