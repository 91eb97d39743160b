//! Terminal-state detection.

use tracing::instrument;

use super::super::Board;

/// True iff every box on the board is claimed.
#[instrument(skip(board))]
pub fn is_terminal(board: &Board) -> bool {
    board.claimed_count() == board.grid().box_count()
}

/// Boxes still up for grabs.
pub fn remaining_cells(board: &Board) -> usize {
    board.grid().box_count() - board.claimed_count()
}
