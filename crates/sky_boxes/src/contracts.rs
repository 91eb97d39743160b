//! Contract-based validation for Sky Boxes.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} apply_move {Q}`.

use tracing::{instrument, warn};

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, SkyBoxesInvariants};
use super::session::GameSession;
use super::Phase;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} must hold before applying action
/// - Postcondition: {Q(before, after)} must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is still running.
pub struct GameInProgress;

impl GameInProgress {
    #[instrument(skip(session))]
    pub fn check(_mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.phase() == Phase::GameOver {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the edge lies on the session's grid.
pub struct EdgeOnBoard;

impl EdgeOnBoard {
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if mov.edge.in_bounds(session.grid()) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(mov.edge))
        }
    }
}

/// Precondition: nobody has drawn the edge yet.
pub struct EdgeUndrawn;

impl EdgeUndrawn {
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.board().is_drawn(&mov.edge) {
            Err(MoveError::AlreadyDrawn(mov.edge))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover holds the turn.
pub struct MoversTurn;

impl MoversTurn {
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if mov.party != session.turn() {
            Err(MoveError::WrongTurn(mov.party))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition, checked in rejection order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        GameInProgress::check(mov, session)?;
        EdgeOnBoard::check(mov, session)?;
        EdgeUndrawn::check(mov, session)?;
        MoversTurn::check(mov, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Ownership only ever goes from unclaimed to claimed, one edge per move.
pub struct OwnershipMonotonic;

impl OwnershipMonotonic {
    #[instrument(skip(before, after))]
    pub fn holds(before: &GameSession, after: &GameSession) -> bool {
        let (b, a) = (before.board(), after.board());
        let kept = |old: &[crate::Owner], new: &[crate::Owner]| {
            old.len() == new.len()
                && old
                    .iter()
                    .zip(new)
                    .all(|(o, n)| !o.is_claimed() || o == n)
        };
        let one_edge = a.drawn_count() == b.drawn_count() + 1;
        let valid = one_edge && kept(b.edges(), a.edges()) && kept(b.cells(), a.cells());
        if !valid {
            warn!(
                before = b.drawn_count(),
                after = a.drawn_count(),
                "Ownership monotonicity violated"
            );
        }
        valid
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Game not over
/// - Edge on the grid and undrawn
/// - Mover holds the turn
///
/// Postconditions:
/// - Exactly one more edge drawn, nothing un-claimed
/// - Every [`SkyBoxesInvariants`] member holds
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        if !OwnershipMonotonic::holds(before, after) {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: ownership changed outside the drawn edge".to_string(),
            ));
        }
        SkyBoxesInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
