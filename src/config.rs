//! Configuration management for Taskboard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::board::SortOption;
use crate::constants::{
    API_URL_ENV, COLUMN_DEFAULT_WIDTH, COLUMN_MAX_WIDTH, COLUMN_MIN_WIDTH, CONFIG_GENERATED, DEFAULT_DATETIME_FORMAT,
};
use crate::session::Session;
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, e.g. "http://localhost:5000/api".
    /// The TASKBOARD_API_URL environment variable takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial task ordering: "recent" or "oldest"
    pub default_sort: SortOption,
    /// Enable mouse support (click and drag tasks between columns)
    pub mouse_enabled: bool,
    /// Width of each board column in terminal cells
    pub column_width: u16,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format for task creation timestamps
    pub datetime_format: String,
    /// Show task descriptions on cards
    pub show_descriptions: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in the data directory
    pub enabled: bool,
    /// One of "error", "warn", "info", "debug", "trace"
    pub level: String,
}

/// Session file configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Override the session file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_sort: SortOption::Recent,
            mouse_enabled: true,
            column_width: COLUMN_DEFAULT_WIDTH,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            show_descriptions: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter, if `level` is a known name
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => Some(log::LevelFilter::Off),
            "error" => Some(log::LevelFilter::Error),
            "warn" => Some(log::LevelFilter::Warn),
            "info" => Some(log::LevelFilter::Info),
            "debug" => Some(log::LevelFilter::Debug),
            "trace" => Some(log::LevelFilter::Trace),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = Some(url);
            }
        }
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("taskboard.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("taskboard").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate UI settings
        if self.ui.column_width < COLUMN_MIN_WIDTH || self.ui.column_width > COLUMN_MAX_WIDTH {
            anyhow::bail!(
                "column_width must be between {} and {} cells, got {}",
                COLUMN_MIN_WIDTH,
                COLUMN_MAX_WIDTH,
                self.ui.column_width
            );
        }

        // Validate datetime format
        if self.display.datetime_format.is_empty()
            || StrftimeItems::new(&self.display.datetime_format).any(|item| matches!(item, Item::Error))
        {
            anyhow::bail!("Invalid datetime_format '{}'", self.display.datetime_format);
        }

        if self.logging.level_filter().is_none() {
            anyhow::bail!(
                "Invalid logging level '{}', expected one of off, error, warn, info, debug, trace",
                self.logging.level
            );
        }

        // An explicitly configured URL must at least parse
        if let Some(url) = &self.api.base_url {
            url::Url::parse(url).with_context(|| format!("Invalid api.base_url '{url}'"))?;
        }

        Ok(())
    }

    /// The API base URL; startup cannot continue without one
    pub fn base_url(&self) -> Result<&str> {
        match self.api.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                url::Url::parse(url).with_context(|| format!("Invalid api.base_url '{url}'"))?;
                Ok(url)
            }
            _ => anyhow::bail!(
                "API base URL is not configured. Set {API_URL_ENV} or api.base_url in {}",
                Self::get_default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "taskboard.toml".to_string())
            ),
        }
    }

    /// Session file location, honouring the override
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session.path {
            Some(path) => Ok(path.clone()),
            None => Session::default_path(),
        }
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Taskboard Configuration File\n# Generated on {}\n\n# [api]\n# base_url = \"http://localhost:5000/api\"\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("taskboard"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
