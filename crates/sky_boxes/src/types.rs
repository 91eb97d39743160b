//! Core domain types for Sky Boxes.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two sides in a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
pub enum Party {
    /// The human at the keyboard (always moves first).
    #[display("Player")]
    Player,
    /// The rule-based opponent.
    #[display("Bot")]
    Bot,
}

impl Party {
    /// Returns the other party.
    pub fn opponent(self) -> Self {
        match self {
            Party::Player => Party::Bot,
            Party::Bot => Party::Player,
        }
    }

    /// Single-letter tag used when drawing claimed boxes.
    pub fn initial(self) -> char {
        match self {
            Party::Player => 'P',
            Party::Bot => 'B',
        }
    }
}

/// Ownership tag for an edge or a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
    /// Nobody has drawn / completed it yet.
    #[default]
    Unclaimed,
    /// Owned by a party. Never reverts.
    Claimed(Party),
}

impl Owner {
    /// Returns the owning party, if any.
    pub fn party(self) -> Option<Party> {
        match self {
            Owner::Unclaimed => None,
            Owner::Claimed(party) => Some(party),
        }
    }

    /// True once a party owns it.
    pub fn is_claimed(self) -> bool {
        matches!(self, Owner::Claimed(_))
    }
}

/// A dot on the lattice, `x` is the column and `y` the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{x},{y}")]
pub struct Dot {
    /// Column, `0..cols`.
    pub x: usize,
    /// Row, `0..rows`.
    pub y: usize,
}

impl Dot {
    /// Creates a dot.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring dot in `direction`, if it lies on `grid`.
    pub fn step(self, direction: Direction, grid: &Grid) -> Option<Dot> {
        let next = match direction {
            Direction::Up => Dot::new(self.x, self.y.checked_sub(1)?),
            Direction::Down => Dot::new(self.x, self.y.checked_add(1)?),
            Direction::Left => Dot::new(self.x.checked_sub(1)?, self.y),
            Direction::Right => Dot::new(self.x.checked_add(1)?, self.y),
        };
        grid.contains(next).then_some(next)
    }
}

/// Lattice direction, used for cursor movement and edge selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

/// Immutable grid dimensions, measured in dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Smallest grid that still has a box.
    pub const MIN_SIDE: usize = 2;

    /// Creates a grid of `rows x cols` dots.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if either side is below [`Grid::MIN_SIDE`].
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows < Self::MIN_SIDE || cols < Self::MIN_SIDE {
            return Err(GridError::new(format!(
                "grid must be at least {0}x{0} dots, got {rows}x{cols}",
                Self::MIN_SIDE
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Number of dot rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of dot columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of dots.
    pub fn dot_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of horizontal edges; they come first in the edge enumeration.
    pub fn horizontal_edge_count(&self) -> usize {
        self.rows * (self.cols - 1)
    }

    /// Number of vertical edges.
    pub fn vertical_edge_count(&self) -> usize {
        (self.rows - 1) * self.cols
    }

    /// Total number of drawable edges.
    pub fn edge_count(&self) -> usize {
        self.horizontal_edge_count() + self.vertical_edge_count()
    }

    /// Total number of boxes.
    pub fn box_count(&self) -> usize {
        (self.rows - 1) * (self.cols - 1)
    }

    /// True if `dot` lies on this grid.
    pub fn contains(&self, dot: Dot) -> bool {
        dot.x < self.cols && dot.y < self.rows
    }
}

/// Invalid grid dimensions.
#[derive(Debug, Clone, Display, Error)]
#[display("Grid error: {} at {}:{}", message, file, line)]
pub struct GridError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GridError {
    /// Creates a new grid error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.dot_count(), 12);
        assert_eq!(grid.horizontal_edge_count(), 9);
        assert_eq!(grid.vertical_edge_count(), 8);
        assert_eq!(grid.edge_count(), 17);
        assert_eq!(grid.box_count(), 6);
    }

    #[test]
    fn test_grid_rejects_degenerate_sizes() {
        assert!(Grid::new(1, 5).is_err());
        assert!(Grid::new(5, 1).is_err());
        assert!(Grid::new(2, 2).is_ok());
    }

    #[test]
    fn test_dot_step_stays_on_grid() {
        let grid = Grid::new(3, 3).unwrap();
        let corner = Dot::new(0, 0);
        assert_eq!(corner.step(Direction::Up, &grid), None);
        assert_eq!(corner.step(Direction::Left, &grid), None);
        assert_eq!(corner.step(Direction::Right, &grid), Some(Dot::new(1, 0)));
        assert_eq!(
            Dot::new(2, 2).step(Direction::Down, &grid),
            None,
            "bottom row has no dot below"
        );
    }

    #[test]
    fn test_party_opponent() {
        assert_eq!(Party::Player.opponent(), Party::Bot);
        assert_eq!(Party::Bot.opponent(), Party::Player);
    }
}
