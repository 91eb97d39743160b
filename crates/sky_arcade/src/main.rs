//! Sky Arcade - terminal entry point.

#![warn(missing_docs)]

mod cli;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use sky_arcade::{ArcadeConfig, GameKind, LobbyController, simulate};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (RUST_LOG and friends)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ArcadeConfig::load(&cli.config)?.with_overrides(cli.overrides.into());
    config.validate()?;
    initialize_tracing(config.log_file())?;
    info!(config = ?config, "Sky Arcade starting");

    match cli.command.unwrap_or(Command::Lobby) {
        Command::Lobby => run_lobby(LobbyController::new(config)).await,
        Command::Play => {
            run_lobby(LobbyController::launching(config, GameKind::SkyBoxes)?).await
        }
        Command::Simulate { games } => run_simulation(&config, games),
    }
}

/// Sends tracing output to the log file; the terminal belongs to the UI.
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sky_arcade=debug,sky_boxes=debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the lobby in the alternate screen, restoring the terminal afterwards.
#[instrument(skip_all)]
async fn run_lobby(mut controller: LobbyController) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby loop error");
    }
    res
}

/// Plays `games` headless games and prints the summary.
#[instrument(skip(config))]
fn run_simulation(config: &ArcadeConfig, games: u32) -> Result<()> {
    let mut rng = match config.sky_boxes().seed() {
        Some(seed) => SmallRng::seed_from_u64(*seed),
        None => SmallRng::from_entropy(),
    };
    let summary = simulate(config.grid()?, games, &mut rng)?;
    println!("{summary}");
    Ok(())
}
