//! The games the arcade offers.

use derive_more::Display;
use strum::IntoEnumIterator;
use tracing::instrument;

/// A game in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter)]
pub enum GameKind {
    /// Dots and boxes against the bot.
    #[display("Sky Boxes")]
    SkyBoxes,
}

impl GameKind {
    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::SkyBoxes => "sky-boxes",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SkyBoxes => "Sky Boxes",
        }
    }

    /// One-line pitch shown in the menu.
    pub fn description(self) -> &'static str {
        match self {
            Self::SkyBoxes => {
                "Connect the dots, close boxes to score and keep the turn. Outscore the bot."
            }
        }
    }
}

/// Registry of playable games.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameCatalog;

impl GameCatalog {
    /// All games, in menu order.
    pub fn all() -> Vec<GameKind> {
        GameKind::iter().collect()
    }

    /// Looks a game up by its identifier.
    #[instrument]
    pub fn by_id(id: &str) -> Option<GameKind> {
        GameKind::iter().find(|game| game.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(GameCatalog::by_id("sky-boxes"), Some(GameKind::SkyBoxes));
        assert_eq!(GameCatalog::by_id("game1"), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let all = GameCatalog::all();
        let mut ids: Vec<_> = all.iter().map(|g| g.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
        assert_eq!(GameKind::SkyBoxes.to_string(), GameKind::SkyBoxes.name());
    }
}
