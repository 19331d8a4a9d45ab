use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::RecvTimeoutError;

use team_scoreboard::config::{Config, APP_DIR};
use team_scoreboard::console::{parse_line, Input, HELP, RESET_PROMPT};
use team_scoreboard::error::AppResult;
use team_scoreboard::messaging::{Command, CommandExecutor, CommandResult, Confirmed, EventBus};
use team_scoreboard::persistence::FileStore;
use team_scoreboard::scoreboard::Scoreboard;
use team_scoreboard::view::ConsoleView;

const LOG_TARGET_STARTUP: &str = "team_scoreboard::startup";

/// How often pending toasts and highlights are advanced while idle
const TICK: Duration = Duration::from_millis(100);

/// Initialize tracing with file rotation
///
/// Logs are written to `<config dir>/TeamScoreboard/logs/`, one file per day
/// (`team-scoreboard.log.YYYY-MM-DD`). Debug builds also log to stderr so the
/// board on stdout stays readable.
fn initialize_tracing(default_filter: &str) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "team-scoreboard.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment(config: &Config) {
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting Team Scoreboard v{} on {} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Config file: {}",
        Config::config_path_display()
    );
    tracing::debug!(target: LOG_TARGET_STARTUP, "Settings: {:?}", config);
}

/// Forward stdin lines to the main loop; the channel closes at EOF
fn spawn_input_reader() -> AppResult<crossbeam_channel::Receiver<String>> {
    let (tx, rx) = crossbeam_channel::unbounded();

    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("Input closed");
        })
        .context("Failed to spawn input thread")?;

    Ok(rx)
}

fn main() -> AppResult<()> {
    let config = Config::load().context("Failed to load configuration")?;
    initialize_tracing(&config.log_filter);
    log_runtime_environment(&config);

    let storage_dir = config.storage_dir()?;
    let store = FileStore::open(&storage_dir)
        .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;

    let view = ConsoleView::new(io::stdout());
    let board = Scoreboard::open(store, view, config.board_settings(), EventBus::new());
    let mut executor = CommandExecutor::new(board, config.export_dir());

    let lines = spawn_input_reader()?;
    println!("Type 'help' for a list of commands.");

    let mut awaiting_reset = false;
    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) if awaiting_reset => {
                awaiting_reset = false;
                match Confirmed::from_answer(&line) {
                    Some(confirmed) => {
                        executor.execute_sync(Command::ResetAll(confirmed));
                    }
                    None => println!("Reset cancelled"),
                }
            }
            Ok(line) => match parse_line(&line) {
                Ok(Input::Command(Command::Quit)) => break,
                Ok(Input::Command(command)) => {
                    let is_export = matches!(command, Command::Export);
                    let result = executor.execute_sync(command);
                    if let (true, CommandResult::SuccessWithValue(path)) = (is_export, &result) {
                        println!("Saved {}", path);
                    }
                }
                Ok(Input::ConfirmReset) => {
                    print!("{}", RESET_PROMPT);
                    io::stdout().flush().context("Failed to write prompt")?;
                    awaiting_reset = true;
                }
                Ok(Input::Show) => executor.board_mut().view_mut().print_board(),
                Ok(Input::Help) => println!("{}", HELP),
                Ok(Input::Empty) => {}
                Err(e) => println!("{}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        executor.tick(Instant::now());
    }

    tracing::info!("Shutting down");
    Ok(())
}
