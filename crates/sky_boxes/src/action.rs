//! First-class move types for Sky Boxes.
//!
//! A move is a party drawing one edge. Moves are validated by the contracts
//! before the session applies them.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::edge::{Cell, Edge};
use super::phases::Phase;
use super::types::Party;

/// A party drawing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The party drawing.
    pub party: Party,
    /// The edge being drawn.
    pub edge: Edge,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(party: Party, edge: Edge) -> Self {
        Self { party, edge }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.party, self.edge)
    }
}

/// What an applied move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The move that was applied.
    pub action: Move,
    /// Boxes the move completed (zero, one or two).
    pub completed: Vec<Cell>,
    /// Phase after the move.
    pub phase: Phase,
}

impl MoveReport {
    /// True if the mover keeps the turn (completed a box, game not over).
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty() && self.phase != Phase::GameOver
    }
}

/// Error that can occur when validating or applying a move.
///
/// Everything except [`MoveError::NoMovesAvailable`] and
/// [`MoveError::InvariantViolation`] is an expected, ignorable rejection:
/// the session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The edge key could not be parsed into adjacent dots.
    #[display("{}", _0)]
    Malformed(String),

    /// The edge lies outside the grid.
    #[display("Edge {} is off the board", _0)]
    OutOfBounds(Edge),

    /// The edge has already been drawn.
    #[display("Edge {} is already drawn", _0)]
    AlreadyDrawn(Edge),

    /// It's not this party's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Party),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A deferred bot move outlived the position it was scheduled for.
    #[display("Bot move was scheduled for an earlier position")]
    StaleTicket,

    /// The bot found nothing to draw on a board that is not finished.
    #[display("No undrawn edge left but the game is not over")]
    NoMovesAvailable,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// True for rejections the caller may silently drop.
    pub fn is_ignored(&self) -> bool {
        !matches!(
            self,
            MoveError::NoMovesAvailable | MoveError::InvariantViolation(_)
        )
    }
}

impl std::error::Error for MoveError {}
