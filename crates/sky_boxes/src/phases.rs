//! Session phases and the derived game outcome.

use serde::{Deserialize, Serialize};

use super::types::Party;

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to draw an edge.
    AwaitingPlayerMove,
    /// Waiting for the bot's (deferred) move.
    AwaitingBotMove,
    /// Every box is claimed. Only `reset` leaves this phase.
    GameOver,
}

impl Phase {
    /// The phase in which `party` is expected to move.
    pub fn awaiting(party: Party) -> Self {
        match party {
            Party::Player => Phase::AwaitingPlayerMove,
            Party::Bot => Phase::AwaitingBotMove,
        }
    }

    /// The party expected to move, `None` once the game is over.
    pub fn mover(self) -> Option<Party> {
        match self {
            Phase::AwaitingPlayerMove => Some(Party::Player),
            Phase::AwaitingBotMove => Some(Party::Bot),
            Phase::GameOver => None,
        }
    }
}

/// Outcome of a finished game, derived from the final scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The party with more boxes.
    Winner(Party),
    /// Equal scores.
    Tie,
}

impl Outcome {
    /// Compares final scores.
    pub fn from_scores(player: u32, bot: u32) -> Self {
        match player.cmp(&bot) {
            std::cmp::Ordering::Greater => Outcome::Winner(Party::Player),
            std::cmp::Ordering::Less => Outcome::Winner(Party::Bot),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Party> {
        match self {
            Outcome::Winner(party) => Some(*party),
            Outcome::Tie => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(Party::Player) => write!(f, "You win"),
            Outcome::Winner(Party::Bot) => write!(f, "Bot wins"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
