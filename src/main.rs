//! Terminal Tetris runner (default binary).
//!
//! Parses options, sets up file logging and the data directory, then hands
//! the terminal to [`app::App`]. `--print-leaderboard` skips the UI entirely.

mod app;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris_arcade::cli::Args;
use tetris_arcade::session::SessionManager;
use tetris_arcade::store::{
    CredentialStore, DataDir, HistoryStore, JsonCredentialStore, JsonlHistoryStore,
};
use tetris_arcade::term::TerminalRenderer;

use app::App;

fn main() -> Result<()> {
    let args = Args::parse();
    let data_dir = args.data_dir();
    data_dir
        .ensure()
        .with_context(|| format!("creating data directory {}", data_dir.root().display()))?;
    init_logging(&data_dir)?;

    let sessions = SessionManager::new(
        JsonCredentialStore::new(data_dir.users_path()),
        JsonlHistoryStore::new(data_dir.history_path()),
    );
    info!(data_dir = %data_dir.root().display(), "starting");

    if args.print_leaderboard {
        return print_leaderboard(&sessions, args.leaderboard_size);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = App::new(&args, sessions).run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `<data-dir>/tetris.log`; the terminal belongs to the game.
fn init_logging(data_dir: &DataDir) -> Result<()> {
    let path = data_dir.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn print_leaderboard<C: CredentialStore, H: HistoryStore>(
    sessions: &SessionManager<C, H>,
    size: usize,
) -> Result<()> {
    let standings = sessions
        .leaderboard()
        .standings(size)
        .context("reading game history")?;

    let mut out = io::stdout().lock();
    writeln!(out, "{:>4}  {:<32}  {:>8}  {:>5}  {}", "#", "PLAYER", "BEST", "GAMES", "DATE")?;
    for standing in &standings {
        writeln!(
            out,
            "{:>4}  {:<32}  {:>8}  {:>5}  {}",
            standing.rank,
            standing.name(),
            standing.score(),
            standing.plays,
            standing.best.played_at.format("%Y-%m-%d %H:%M"),
        )?;
    }
    if standings.is_empty() {
        writeln!(out, "no games recorded yet")?;
    }
    Ok(())
}
