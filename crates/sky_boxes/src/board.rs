//! Index-addressed board storage.

use serde::Serialize;
use tracing::instrument;

use super::edge::{Cell, Edge};
use super::types::{Grid, Owner, Party};

/// Edge and box ownership for one grid.
///
/// Ownership lives in two fixed-size arrays indexed by the grid's edge and
/// box enumerations. Entries only ever go from `Unclaimed` to `Claimed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    grid: Grid,
    edges: Vec<Owner>,
    cells: Vec<Owner>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            edges: vec![Owner::Unclaimed; grid.edge_count()],
            cells: vec![Owner::Unclaimed; grid.box_count()],
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owner of `edge`, or `None` if it is off the grid.
    pub fn edge_owner(&self, edge: &Edge) -> Option<Owner> {
        edge.index(&self.grid).map(|i| self.edges[i])
    }

    /// Owner of `cell`, or `None` if it is off the grid.
    pub fn cell_owner(&self, cell: &Cell) -> Option<Owner> {
        cell.index(&self.grid).map(|i| self.cells[i])
    }

    /// True if `edge` is on the grid and already drawn.
    pub fn is_drawn(&self, edge: &Edge) -> bool {
        self.edge_owner(edge).is_some_and(Owner::is_claimed)
    }

    /// Edge ownership in enumeration order.
    pub fn edges(&self) -> &[Owner] {
        &self.edges
    }

    /// Box ownership in row-major order.
    pub fn cells(&self) -> &[Owner] {
        &self.cells
    }

    /// Drawn edges with their owners.
    pub fn drawn_edges(&self) -> impl Iterator<Item = (Edge, Party)> + '_ {
        self.edges.iter().enumerate().filter_map(|(i, owner)| {
            let party = owner.party()?;
            Some((Edge::from_index(&self.grid, i)?, party))
        })
    }

    /// Claimed boxes with their owners.
    pub fn claimed_cells(&self) -> impl Iterator<Item = (Cell, Party)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, owner)| {
            let party = owner.party()?;
            Some((Cell::from_index(&self.grid, i)?, party))
        })
    }

    /// Edges nobody has drawn yet, in enumeration order.
    pub fn undrawn_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, owner)| !owner.is_claimed())
            .filter_map(|(i, _)| Edge::from_index(&self.grid, i))
    }

    /// Number of drawn edges.
    pub fn drawn_count(&self) -> usize {
        self.edges.iter().filter(|o| o.is_claimed()).count()
    }

    /// Number of claimed boxes.
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|o| o.is_claimed()).count()
    }

    /// Number of boxes owned by `party`.
    pub fn cells_owned_by(&self, party: Party) -> usize {
        self.cells
            .iter()
            .filter(|o| **o == Owner::Claimed(party))
            .count()
    }

    /// Sets an edge's owner. Callers check legality first.
    pub(crate) fn set_edge(&mut self, edge: &Edge, owner: Owner) {
        if let Some(i) = edge.index(&self.grid) {
            self.edges[i] = owner;
        }
    }

    /// Sets a box's owner. Callers check completion first.
    pub(crate) fn set_cell(&mut self, cell: &Cell, owner: Owner) {
        if let Some(i) = cell.index(&self.grid) {
            self.cells[i] = owner;
        }
    }

    /// Formats the board as a human-readable string.
    ///
    /// Dots are `+`, drawn edges `-`/`|`, claimed boxes show the owner's
    /// initial.
    pub fn display(&self) -> String {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let mut result = String::new();
        for y in 0..rows {
            for x in 0..cols {
                result.push('+');
                if x + 1 < cols {
                    let drawn = self.is_drawn(&Edge::horizontal(x, y));
                    result.push_str(if drawn { "---" } else { "   " });
                }
            }
            result.push('\n');
            if y + 1 == rows {
                break;
            }
            for x in 0..cols {
                let drawn = self.is_drawn(&Edge::vertical(x, y));
                result.push(if drawn { '|' } else { ' ' });
                if x + 1 < cols {
                    match self.cell_owner(&Cell::new(x, y)).and_then(Owner::party) {
                        Some(party) => {
                            result.push(' ');
                            result.push(party.initial());
                            result.push(' ');
                        }
                        None => result.push_str("   "),
                    }
                }
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(Grid::new(3, 3).unwrap());
        assert_eq!(board.edges().len(), 12);
        assert_eq!(board.cells().len(), 4);
        assert_eq!(board.drawn_count(), 0);
        assert_eq!(board.claimed_count(), 0);
        assert_eq!(board.undrawn_edges().count(), 12);
    }

    #[test]
    fn test_set_edge_marks_drawn() {
        let mut board = Board::new(Grid::new(3, 3).unwrap());
        let edge = Edge::vertical(1, 0);
        board.set_edge(&edge, Owner::Claimed(Party::Bot));
        assert!(board.is_drawn(&edge));
        assert_eq!(board.drawn_edges().collect::<Vec<_>>(), vec![(edge, Party::Bot)]);
        assert_eq!(board.undrawn_edges().count(), 11);
    }

    #[test]
    fn test_off_grid_lookups_return_none() {
        let board = Board::new(Grid::new(2, 2).unwrap());
        assert_eq!(board.edge_owner(&Edge::horizontal(1, 0)), None);
        assert_eq!(board.cell_owner(&Cell::new(1, 0)), None);
        assert!(!board.is_drawn(&Edge::horizontal(5, 5)));
    }

    #[test]
    fn test_display_draws_claimed_box() {
        let mut board = Board::new(Grid::new(2, 2).unwrap());
        let cell = Cell::new(0, 0);
        for side in cell.sides() {
            board.set_edge(&side, Owner::Claimed(Party::Player));
        }
        board.set_cell(&cell, Owner::Claimed(Party::Player));
        assert_eq!(board.display(), "+---+\n| P |\n+---+\n");
    }
}
