use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use taskboard::backend::{Backend, HttpBackend};
use taskboard::board::BoardStore;
use taskboard::config::Config;
use taskboard::constants::{
    ERROR_CALLBACK_INCOMPLETE, ERROR_LOGIN_FAILED, ERROR_NOT_LOGGED_IN, PASSWORD_ENV, SUCCESS_LOGGED_IN,
    SUCCESS_LOGGED_OUT, SUCCESS_REGISTERED,
};
use taskboard::logger::{self, Logger};
use taskboard::session::{CallbackOutcome, Session};
use taskboard::ui::{self, App};

mod cli;

use cli::{Cli, Command, ConfigAction};

/// Resolve a password from the flag, the environment, or one line of stdin
fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn run_board(config: Config, session: Session, logger: Logger, base_url: &str) -> Result<()> {
    if !session.is_authenticated() {
        anyhow::bail!(ERROR_NOT_LOGGED_IN);
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::with_session(base_url, &session));
    let board = BoardStore::new(backend);
    let app = ui::run_app(App::new(board, session, config, logger)).await?;

    if app.logged_out {
        println!("{SUCCESS_LOGGED_OUT}");
    }
    Ok(())
}

/// Commands that talk to the API
async fn run_with_server(command: Command, config: Config, mut session: Session, log_buffer: Logger) -> Result<()> {
    let base_url = config.base_url()?.to_string();
    info!("Starting taskboard against {base_url}");

    match command {
        Command::Board => run_board(config, session, log_buffer, &base_url).await?,
        Command::Login { email, password } => {
            let password = read_password(password)?;
            let backend = HttpBackend::new(&base_url, None);
            match backend.login(&email, &password).await {
                Ok(login) => {
                    session.store_login(&login)?;
                    println!("{SUCCESS_LOGGED_IN} (session saved to {})", session.path().display());
                }
                Err(e) if e.is_auth() => anyhow::bail!(ERROR_LOGIN_FAILED),
                Err(e) => return Err(e).context(ERROR_LOGIN_FAILED),
            }
        }
        Command::Register { name, email, password } => {
            let password = read_password(password)?;
            HttpBackend::new(&base_url, None)
                .register(&name, &email, &password)
                .await
                .context("Registration failed")?;
            println!("{SUCCESS_REGISTERED}");
        }
        Command::AuthCallback { url } => match session.complete_oauth(&url)? {
            CallbackOutcome::Authenticated => {
                println!("{SUCCESS_LOGGED_IN}");
                run_board(config, session, log_buffer, &base_url).await?;
            }
            CallbackOutcome::LoginRequired => anyhow::bail!(ERROR_CALLBACK_INCOMPLETE),
        },
        // Handled without a server
        Command::Logout | Command::Config { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let command = cli.command.unwrap_or(Command::Board);

    // Needs neither a server nor a session
    if let Command::Config {
        action: ConfigAction::Generate { path },
    } = &command
    {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let log_buffer = Logger::new();
    logger::init(&config.logging, &log_buffer)?;

    let mut session = Session::load(config.session_path()?)?;

    if !command.needs_server() {
        session.clear()?;
        println!("{SUCCESS_LOGGED_OUT}");
        return Ok(());
    }

    run_with_server(command, config, session, log_buffer).await
}
