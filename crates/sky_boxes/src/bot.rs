//! Rule-based bot for Sky Boxes.
//!
//! The bot works in three tiers over the current board:
//!
//! 1. **Completion** - take a box whose other three sides are drawn.
//! 2. **Safe** - draw an edge that leaves no box with three sides.
//! 3. **Forced** - draw anything.
//!
//! It never looks ahead to chain completions. Randomness is injected so
//! callers (and tests) control the seed.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::rules::{drawn_sides, missing_side};
use super::{Board, Edge, Owner, Party};

/// Which tier produced the bot's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Completes a box.
    Completion,
    /// Gives nothing away.
    Safe,
    /// Every remaining edge hands the opponent a box.
    Forced,
}

/// Missing sides of every unclaimed box that has exactly three sides drawn.
///
/// Boxes are scanned row-major and each box's sides top, right, bottom,
/// left, so the first entry is deterministic.
pub fn completion_moves(board: &Board) -> Vec<Edge> {
    board
        .grid()
        .cells()
        .filter(|cell| board.cell_owner(cell) == Some(Owner::Unclaimed))
        .filter(|cell| drawn_sides(board, cell) == 3)
        .filter_map(|cell| missing_side(board, &cell))
        .collect()
}

/// Undrawn edges that, once drawn, leave no box with exactly three sides.
///
/// Each candidate is drawn on a scratch copy of the board; only the boxes it
/// borders can change their side count.
pub fn safe_moves(board: &Board) -> Vec<Edge> {
    let mut scratch = board.clone();
    let grid = *board.grid();
    let mut safe = Vec::new();
    for edge in board.undrawn_edges() {
        scratch.set_edge(&edge, Owner::Claimed(Party::Bot));
        let gifts_a_box = edge
            .adjacent_cells(&grid)
            .any(|cell| drawn_sides(&scratch, &cell) == 3);
        scratch.set_edge(&edge, Owner::Unclaimed);
        if !gifts_a_box {
            safe.push(edge);
        }
    }
    safe
}

/// Every undrawn edge, in enumeration order.
pub fn available_moves(board: &Board) -> Vec<Edge> {
    board.undrawn_edges().collect()
}

/// Picks the bot's next edge and reports which tier it came from.
///
/// Returns `None` only when every edge is drawn.
#[instrument(skip(board, rng))]
pub fn choose_move_with_tier<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(Edge, Tier)> {
    if let Some(edge) = completion_moves(board).first() {
        debug!(edge = %edge, "Bot completes a box");
        return Some((*edge, Tier::Completion));
    }

    let safe = safe_moves(board);
    if let Some(edge) = safe.choose(rng) {
        debug!(edge = %edge, candidates = safe.len(), "Bot plays safe");
        return Some((*edge, Tier::Safe));
    }

    let available = available_moves(board);
    let edge = available.choose(rng)?;
    debug!(edge = %edge, candidates = available.len(), "Bot forced to give a box away");
    Some((*edge, Tier::Forced))
}

/// Picks the bot's next edge. See [`choose_move_with_tier`].
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Edge> {
    choose_move_with_tier(board, rng).map(|(edge, _)| edge)
}
