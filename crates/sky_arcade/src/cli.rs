//! Command-line interface for sky_arcade.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sky_arcade::ConfigOverrides;

/// Sky Arcade - terminal mini-games against a bot
#[derive(Parser, Debug)]
#[command(name = "sky_arcade")]
#[command(about = "Terminal game-selection shell with Sky Boxes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults apply if it doesn't exist)
    #[arg(short, long, default_value = "sky_arcade.toml", global = true)]
    pub config: PathBuf,

    /// Settings that override the configuration file
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Subcommand to run (defaults to the lobby)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Game settings accepted on the command line.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OverrideArgs {
    /// Dot rows of the Sky Boxes grid
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Dot columns of the Sky Boxes grid
    #[arg(long, global = true)]
    pub cols: Option<usize>,

    /// Bot think delay in milliseconds
    #[arg(long, global = true)]
    pub think_delay_ms: Option<u64>,

    /// Seed for reproducible bot play
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            rows: args.rows,
            cols: args.cols,
            think_delay_ms: args.think_delay_ms,
            seed: args.seed,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Command {
    /// Open the game menu
    Lobby,

    /// Start Sky Boxes directly
    Play,

    /// Play headless games (random player vs. bot) and print a summary
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,
    },
}
