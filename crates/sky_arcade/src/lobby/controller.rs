//! Lobby controller, the state machine driving the arcade TUI.

use std::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{MenuScreen, SkyBoxesScreen};
use crate::{ArcadeConfig, ConfigError, GameKind};

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    Menu(MenuScreen),
    SkyBoxes(Box<SkyBoxesScreen>),
}

impl ActiveScreen {
    fn render(&self, frame: &mut Frame) {
        match self {
            Self::Menu(s) => s.render(frame),
            Self::SkyBoxes(s) => s.render(frame),
        }
    }

    fn handle_key(&mut self, key: event::KeyEvent) -> ScreenTransition {
        match self {
            Self::Menu(s) => s.handle_key(key),
            Self::SkyBoxes(s) => s.handle_key(key),
        }
    }

    fn tick(&mut self, now: Instant) -> ScreenTransition {
        match self {
            Self::Menu(s) => s.tick(now),
            Self::SkyBoxes(s) => s.tick(now),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Menu(_) => "Menu",
            Self::SkyBoxes(_) => "SkyBoxes",
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    config: ArcadeConfig,
    #[getter(skip)]
    screen: Option<ActiveScreen>,
}

impl LobbyController {
    /// Creates a controller showing the game menu.
    #[instrument(skip(config))]
    pub fn new(config: ArcadeConfig) -> Self {
        info!("Creating LobbyController");
        Self {
            config,
            screen: Some(ActiveScreen::Menu(MenuScreen::new())),
        }
    }

    /// Creates a controller that opens straight into `game`.
    #[instrument(skip(config))]
    pub fn launching(config: ArcadeConfig, game: GameKind) -> Result<Self, ConfigError> {
        let mut controller = Self::new(config);
        controller.screen = Some(controller.launch(game)?);
        Ok(controller)
    }

    /// Name of the active screen, `None` once the user quit.
    pub fn active_screen(&self) -> Option<&'static str> {
        self.screen.as_ref().map(ActiveScreen::name)
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");
        let tick = self.config.tick();

        while let Some(screen) = &self.screen {
            terminal.draw(|f| screen.render(f))?;

            // Drain pending input without blocking the runtime.
            while event::poll(std::time::Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    // Skip key release events (crossterm fires both press and release).
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    self.dispatch(|s| s.handle_key(key))?;
                    if self.screen.is_none() {
                        break;
                    }
                }
            }

            self.dispatch(|s| s.tick(Instant::now()))?;
            sleep(tick).await;
        }

        info!("Lobby quitting");
        Ok(())
    }

    /// Feeds a key to the active screen and applies the resulting transition.
    #[instrument(skip(self, key))]
    pub fn handle_key(&mut self, key: event::KeyEvent) -> Result<(), ConfigError> {
        self.dispatch(|s| s.handle_key(key))
    }

    /// Advances the active screen's timers to `now`.
    pub fn tick(&mut self, now: Instant) -> Result<(), ConfigError> {
        self.dispatch(|s| s.tick(now))
    }

    fn dispatch(
        &mut self,
        f: impl FnOnce(&mut ActiveScreen) -> ScreenTransition,
    ) -> Result<(), ConfigError> {
        let Some(mut current) = self.screen.take() else {
            return Ok(());
        };
        let transition = f(&mut current);
        self.screen = self.apply_transition(transition, current)?;
        Ok(())
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Result<Option<ActiveScreen>, ConfigError> {
        if transition != ScreenTransition::Stay {
            debug!(transition = ?transition, from = current.name(), "Applying screen transition");
        }
        Ok(match transition {
            ScreenTransition::Stay => Some(current),
            ScreenTransition::GoToMenu => {
                info!("Navigating to Menu");
                Some(ActiveScreen::Menu(MenuScreen::new()))
            }
            ScreenTransition::Launch(game) => Some(self.launch(game)?),
            ScreenTransition::Quit => None,
        })
    }

    /// Builds a fresh screen for `game` from the configuration.
    #[instrument(skip(self))]
    fn launch(&self, game: GameKind) -> Result<ActiveScreen, ConfigError> {
        info!(game = %game, "Launching game");
        match game {
            GameKind::SkyBoxes => {
                let settings = self.config.sky_boxes();
                let screen = SkyBoxesScreen::new(
                    self.config.grid()?,
                    self.config.think_delay(),
                    *settings.seed(),
                );
                Ok(ActiveScreen::SkyBoxes(Box::new(screen)))
            }
        }
    }
}
