//! Logging setup.
//!
//! Everything logs through the `log` macros. [`init`] wires a `fern` dispatch
//! that always feeds the in-memory [`Logger`] shown by the logs dialog and,
//! when enabled in the configuration, appends to a log file. Nothing is
//! written to the terminal while the board is on screen.

use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;
use crate::constants::LOG_BUFFER_CAPACITY;

/// Shared in-memory log buffer that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(LOG_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Add an already formatted line, dropping the oldest once full
    pub fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == self.capacity {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Location of the log file written when logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("taskboard").join("taskboard.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `fern` dispatch for `config`, feeding `buffer`.
pub fn dispatch(config: &LoggingConfig, buffer: &Logger) -> Result<fern::Dispatch> {
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    let sink = buffer.clone();

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // Keep HTTP internals out of the board's log
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(fern::Output::call(move |record| sink.push(record.args().to_string())));

    if config.enabled {
        let path = Logger::get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger. Call once at startup.
pub fn init(config: &LoggingConfig, buffer: &Logger) -> Result<()> {
    dispatch(config, buffer)?
        .apply()
        .context("Failed to install logger")?;
    Ok(())
}
