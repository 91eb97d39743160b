//! Sky Boxes - dots-and-boxes against a rule-based bot.
//!
//! Pure game logic with no I/O:
//!
//! - **Board model**: [`Grid`], [`Edge`], [`Cell`] and the index-addressed
//!   [`Board`].
//! - **Rules**: legality, box completion and terminal detection in [`rules`].
//! - **Bot**: the three-tier heuristic in [`bot`].
//! - **Session**: [`GameSession`], the only stateful piece.
//!
//! # Example
//!
//! ```
//! use sky_boxes::{GameSession, Grid, Party};
//!
//! let mut session = GameSession::new(Grid::new(3, 3)?);
//! session.apply_player_move("0,0-1,0")?;
//! assert_eq!(session.turn(), Party::Bot);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod edge;
mod invariants;
mod phases;
mod session;
mod types;

pub mod bot;
pub mod rules;

// Crate-level exports - Board model
pub use board::Board;
pub use edge::{Cell, Edge, KeyParseError, Orientation};
pub use types::{Direction, Dot, Grid, GridError, Owner, Party};

// Crate-level exports - Moves and phases
pub use action::{Move, MoveError, MoveReport};
pub use phases::{Outcome, Phase};

// Crate-level exports - Session
pub use session::{BotTicket, GameSession, Scores, SessionEvent, SessionSnapshot};

// Crate-level exports - Validation
pub use contracts::{Contract, LegalMove, MoveContract};
pub use invariants::{
    ClosedBoxesClaimed, Invariant, InvariantSet, InvariantViolation, PhaseMatchesBoard,
    ScoreMatchesBoxes, SkyBoxesInvariants,
};
