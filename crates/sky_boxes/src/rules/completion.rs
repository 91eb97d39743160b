//! Box-completion detection.

use tracing::{debug, instrument};

use super::super::{Board, Cell, Edge};

/// Number of `cell`'s four sides already drawn.
pub fn drawn_sides(board: &Board, cell: &Cell) -> u8 {
    cell.sides()
        .iter()
        .filter(|side| board.is_drawn(side))
        .count() as u8
}

/// First undrawn side of `cell` in top, right, bottom, left order.
pub fn missing_side(board: &Board, cell: &Cell) -> Option<Edge> {
    cell.sides().into_iter().find(|side| !board.is_drawn(side))
}

/// Boxes completed by drawing `edge`.
///
/// `board` must already contain `edge`. Only the (at most two) boxes that
/// border the edge are candidates; a candidate is reported when all four of
/// its sides are drawn and nobody owns it yet.
#[instrument(skip(board), fields(edge = %edge))]
pub fn detect_completions(edge: &Edge, board: &Board) -> Vec<Cell> {
    let completed: Vec<Cell> = edge
        .adjacent_cells(board.grid())
        .filter(|cell| drawn_sides(board, cell) == 4)
        .filter(|cell| board.cell_owner(cell).is_some_and(|o| !o.is_claimed()))
        .collect();
    if !completed.is_empty() {
        debug!(count = completed.len(), "Edge completed boxes");
    }
    completed
}
