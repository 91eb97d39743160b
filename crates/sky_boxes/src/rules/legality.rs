//! Edge legality.

use tracing::instrument;

use super::super::action::MoveError;
use super::super::{Board, Edge};

/// True iff `key` names a lattice-adjacent, in-bounds, undrawn edge.
#[instrument(skip(board))]
pub fn is_legal_edge(board: &Board, key: &str) -> bool {
    check_edge(board, key).is_ok()
}

/// Parses `key` and checks it against the board.
///
/// # Errors
///
/// [`MoveError::Malformed`] for unparseable keys, [`MoveError::OutOfBounds`]
/// and [`MoveError::AlreadyDrawn`] for keys the board cannot take.
#[instrument(skip(board))]
pub fn check_edge(board: &Board, key: &str) -> Result<Edge, MoveError> {
    let edge: Edge = key
        .parse()
        .map_err(|e: crate::KeyParseError| MoveError::Malformed(e.to_string()))?;
    if !edge.in_bounds(board.grid()) {
        return Err(MoveError::OutOfBounds(edge));
    }
    if board.is_drawn(&edge) {
        return Err(MoveError::AlreadyDrawn(edge));
    }
    Ok(edge)
}
