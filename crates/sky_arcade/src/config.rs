//! Arcade configuration loaded from TOML with CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sky_boxes::Grid;
use tracing::{debug, info, instrument};

/// Largest grid side the terminal board can comfortably show.
pub const MAX_SIDE: usize = 12;

/// Settings for the Sky Boxes game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyBoxesConfig {
    /// Dot rows.
    rows: usize,
    /// Dot columns.
    cols: usize,
    /// Pause before each bot move, in milliseconds.
    think_delay_ms: u64,
    /// Fixed RNG seed for reproducible bot games.
    seed: Option<u64>,
}

impl Default for SkyBoxesConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            think_delay_ms: 700,
            seed: None,
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event loop tick, in milliseconds.
    tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 50 }
    }
}

/// Top-level configuration file.
///
/// ```toml
/// log_file = "sky_arcade.log"
///
/// [sky_boxes]
/// rows = 5
/// cols = 5
/// think_delay_ms = 700
///
/// [ui]
/// tick_ms = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Sky Boxes settings.
    sky_boxes: SkyBoxesConfig,
    /// Terminal settings.
    ui: UiConfig,
    /// Where tracing output goes (the terminal belongs to the UI).
    log_file: PathBuf,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            sky_boxes: SkyBoxesConfig::default(),
            ui: UiConfig::default(),
            log_file: PathBuf::from("sky_arcade.log"),
        }
    }
}

/// Values given on the command line, taking precedence over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Dot rows.
    pub rows: Option<usize>,
    /// Dot columns.
    pub cols: Option<usize>,
    /// Bot think delay in milliseconds.
    pub think_delay_ms: Option<u64>,
    /// RNG seed.
    pub seed: Option<u64>,
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            rows = config.sky_boxes.rows,
            cols = config.sky_boxes.cols,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(rows) = overrides.rows {
            self.sky_boxes.rows = rows;
        }
        if let Some(cols) = overrides.cols {
            self.sky_boxes.cols = cols;
        }
        if let Some(delay) = overrides.think_delay_ms {
            self.sky_boxes.think_delay_ms = delay;
        }
        if overrides.seed.is_some() {
            self.sky_boxes.seed = overrides.seed;
        }
        self
    }

    /// Checks the grid bounds and tick.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.sky_boxes.rows, self.sky_boxes.cols);
        if !(Grid::MIN_SIDE..=MAX_SIDE).contains(&rows) || !(Grid::MIN_SIDE..=MAX_SIDE).contains(&cols)
        {
            return Err(ConfigError::new(format!(
                "Grid must be between {min}x{min} and {max}x{max} dots, got {rows}x{cols}",
                min = Grid::MIN_SIDE,
                max = MAX_SIDE
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::new("UI tick must be positive".to_string()));
        }
        Ok(())
    }

    /// Grid for new Sky Boxes sessions.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.sky_boxes.rows, self.sky_boxes.cols)
            .map_err(|e| ConfigError::new(e.message))
    }

    /// Bot think delay.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.sky_boxes.think_delay_ms)
    }

    /// UI tick interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
