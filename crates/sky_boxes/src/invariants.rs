//! First-class invariants for Sky Boxes.
//!
//! Invariants are logical properties that must hold after every move. The
//! move contract checks them in debug builds; tests check them directly.

use super::rules::{drawn_sides, is_terminal};
use super::session::GameSession;
use super::{Party, Phase};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

/// Invariant: each party's score equals the number of boxes it owns.
pub struct ScoreMatchesBoxes;

impl Invariant<GameSession> for ScoreMatchesBoxes {
    fn holds(session: &GameSession) -> bool {
        [Party::Player, Party::Bot].into_iter().all(|party| {
            session.score(party) as usize == session.board().cells_owned_by(party)
        })
    }

    fn description() -> &'static str {
        "Scores equal the number of boxes each party owns"
    }
}

/// Invariant: a box is claimed exactly when all four of its sides are drawn.
pub struct ClosedBoxesClaimed;

impl Invariant<GameSession> for ClosedBoxesClaimed {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        board.grid().cells().all(|cell| {
            let closed = drawn_sides(board, &cell) == 4;
            let claimed = board.cell_owner(&cell).is_some_and(|o| o.is_claimed());
            closed == claimed
        })
    }

    fn description() -> &'static str {
        "A box is claimed iff its four sides are drawn"
    }
}

/// Invariant: the phase agrees with the board and the turn holder.
pub struct PhaseMatchesBoard;

impl Invariant<GameSession> for PhaseMatchesBoard {
    fn holds(session: &GameSession) -> bool {
        if is_terminal(session.board()) {
            session.phase() == Phase::GameOver
        } else {
            session.phase() == Phase::awaiting(session.turn())
        }
    }

    fn description() -> &'static str {
        "Game is over iff every box is claimed, otherwise the turn holder is awaited"
    }
}

/// All Sky Boxes invariants as a composable set.
pub type SkyBoxesInvariants = (ScoreMatchesBoxes, ClosedBoxesClaimed, PhaseMatchesBoard);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, Party};

    fn session() -> GameSession {
        GameSession::new(Grid::new(3, 3).unwrap())
    }

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        assert!(SkyBoxesInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut session = session();
        for key in ["0,0-1,0", "2,1-2,2", "0,0-0,1", "1,2-2,2", "1,0-1,1", "0,2-1,2", "0,1-1,1"] {
            let mover = session.turn();
            session
                .apply_move(key.parse().unwrap(), mover)
                .expect("scripted move is legal");
        }
        assert_eq!(session.score(Party::Player), 1);
        assert!(SkyBoxesInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (ScoreMatchesBoxes, PhaseMatchesBoard);
        assert!(TwoInvariants::check_all(&session()).is_ok());
    }
}
