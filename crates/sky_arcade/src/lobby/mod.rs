//! Lobby system: the game menu and the game screens it launches.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
pub use screens::{MenuScreen, SkyBoxesScreen};
