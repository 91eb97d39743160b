//! Sky Arcade - a terminal game-selection shell.
//!
//! # Architecture
//!
//! - **Catalog**: the games on offer ([`GameCatalog`]).
//! - **Lobby**: a screen state machine ([`LobbyController`]) with the game
//!   menu and one screen per game.
//! - **UI**: board and status rendering helpers ([`ui`]).
//! - **Simulation**: headless games for the `simulate` command.
//!
//! Game rules live in the [`sky_boxes`] crate; this crate only presents them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod config;
mod lobby;
mod simulate;

pub mod ui;

// Crate-level exports - Configuration
pub use config::{ArcadeConfig, ConfigError, ConfigOverrides, MAX_SIDE, SkyBoxesConfig, UiConfig};

// Crate-level exports - Catalog
pub use catalog::{GameCatalog, GameKind};

// Crate-level exports - Lobby
pub use lobby::{LobbyController, MenuScreen, Screen, ScreenTransition, SkyBoxesScreen};

// Crate-level exports - Simulation
pub use simulate::{SimulationSummary, play_game, simulate};
