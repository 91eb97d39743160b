//! Screen trait and transition type for the lobby state machine.

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::GameKind;

/// The result of handling an input event or a tick on a screen.
///
/// Screens return this to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Back to the game menu, dropping the current game.
    GoToMenu,
    /// Start a fresh game of the given kind.
    Launch(GameKind),
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    /// Advances timers. Called once per loop iteration.
    fn tick(&mut self, _now: Instant) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
