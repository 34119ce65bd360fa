//! Persisted login session.
//!
//! The session holds the bearer token and user id under the fixed keys
//! `token` and `userId` in a small JSON file. It is loaded once on start,
//! handed explicitly to the API client and the UI, and cleared on logout.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::LoginResponse;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";
/// Key under which the user id is persisted.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

/// Result of handling an OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Both credentials were present and have been persisted.
    Authenticated,
    /// Something was missing; the user has to log in normally.
    LoginRequired,
}

/// Session context for one user on this machine.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    token: Option<String>,
    user_id: Option<String>,
}

impl Session {
    /// Read the session file at `path`. A missing file is a logged-out session.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                token: None,
                user_id: None,
            });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let stored: StoredSession = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

        Ok(Self {
            path,
            token: stored.token.filter(|t| !t.is_empty()),
            user_id: stored.user_id.filter(|u| !u.is_empty()),
        })
    }

    /// Default location of the session file.
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("taskboard").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Presence of a token is the only thing that gates the board.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Persist credentials and keep them in memory.
    pub fn store(&mut self, token: &str, user_id: &str) -> Result<()> {
        let stored = StoredSession {
            token: Some(token.to_string()),
            user_id: Some(user_id.to_string()),
        };
        let content = serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        self.token = Some(token.to_string());
        self.user_id = Some(user_id.to_string());
        info!("Session stored for user {user_id}");
        Ok(())
    }

    /// Persist the result of a successful login.
    pub fn store_login(&mut self, login: &LoginResponse) -> Result<()> {
        self.store(&login.token, &login.user_id)
    }

    /// Forget both keys, on disk and in memory.
    pub fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session file: {}", self.path.display()))?;
        }
        self.token = None;
        self.user_id = None;
        info!("Session cleared");
        Ok(())
    }

    /// Handle the OAuth redirect carrying `token` and `userId` query parameters.
    ///
    /// `callback` may be a full URL or just its query string.
    pub fn complete_oauth(&mut self, callback: &str) -> Result<CallbackOutcome> {
        match parse_callback(callback) {
            Some((token, user_id)) => {
                self.store(&token, &user_id)?;
                Ok(CallbackOutcome::Authenticated)
            }
            None => Ok(CallbackOutcome::LoginRequired),
        }
    }
}

/// Extract non-empty `token` and `userId` from a callback URL or query string.
pub fn parse_callback(callback: &str) -> Option<(String, String)> {
    let callback = callback.trim();
    let query = match url::Url::parse(callback) {
        Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
        Err(_) => callback.trim_start_matches('?').to_string(),
    };

    let mut token = None;
    let mut user_id = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            TOKEN_KEY if !value.is_empty() => token = Some(value.into_owned()),
            USER_ID_KEY if !value.is_empty() => user_id = Some(value.into_owned()),
            _ => {}
        }
    }

    Some((token?, user_id?))
}
