//! CLI argument parsing for Taskboard.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskboard",
    about = "A terminal kanban board for a REST task backend",
    version,
    after_help = "Set TASKBOARD_API_URL or [api] base_url in taskboard.toml to point at the server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the board (default)
    Board,

    /// Log in with email and password and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (falls back to TASKBOARD_PASSWORD, then stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (falls back to TASKBOARD_PASSWORD, then stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Finish an OAuth login from the redirect URL (or its query string)
    AuthCallback {
        /// Redirect URL carrying `token` and `userId`
        url: String,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Generate {
        /// Destination (default: the XDG config path)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

impl Command {
    /// Whether the command needs the API base URL
    pub fn needs_server(&self) -> bool {
        !matches!(self, Command::Logout | Command::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command.unwrap_or(Command::Board)
    }

    #[test]
    fn logout_and_config_work_offline() {
        assert!(!command(&["taskboard", "logout"]).needs_server());
        assert!(!command(&["taskboard", "config", "generate"]).needs_server());
    }

    #[test]
    fn server_commands_need_a_base_url() {
        assert!(command(&["taskboard"]).needs_server());
        assert!(command(&["taskboard", "board"]).needs_server());
        assert!(command(&["taskboard", "login", "--email", "a@b.c"]).needs_server());
        assert!(command(&["taskboard", "register", "-n", "Ann", "-e", "a@b.c"]).needs_server());
        assert!(command(&["taskboard", "auth-callback", "?token=abc&userId=u1"]).needs_server());
    }
}
