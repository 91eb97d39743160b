//! Edges ("lines") and boxes ("cells") of the dot lattice.
//!
//! Both have a canonical string key for the presentation boundary
//! (`"x1,y1-x2,y2"` for edges, `"x,y"` for boxes) and a stable index into the
//! grid's enumeration, which is what the [`Board`](crate::Board) stores.

use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::types::{Direction, Dot, Grid};

/// Whether an edge runs along a row or down a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Both endpoints share a row.
    Horizontal,
    /// Both endpoints share a column.
    Vertical,
}

/// A line between two lattice-adjacent dots, endpoints in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("{from}-{to}")]
#[serde(into = "String", try_from = "String")]
pub struct Edge {
    from: Dot,
    to: Dot,
}

impl Edge {
    /// The edge from `(x, y)` to `(x + 1, y)`.
    ///
    /// A start column of `usize::MAX` saturates; the result is on no grid.
    pub fn horizontal(x: usize, y: usize) -> Self {
        Self {
            from: Dot::new(x, y),
            to: Dot::new(x.saturating_add(1), y),
        }
    }

    /// The edge from `(x, y)` to `(x, y + 1)`.
    ///
    /// A start row of `usize::MAX` saturates; the result is on no grid.
    pub fn vertical(x: usize, y: usize) -> Self {
        Self {
            from: Dot::new(x, y),
            to: Dot::new(x, y.saturating_add(1)),
        }
    }

    /// Joins two dots, in either order. `None` unless they are adjacent.
    pub fn between(a: Dot, b: Dot) -> Option<Self> {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        let horizontal = to.y == from.y && from.x.checked_add(1) == Some(to.x);
        let vertical = to.x == from.x && from.y.checked_add(1) == Some(to.y);
        (horizontal || vertical).then_some(Self { from, to })
    }

    /// The edge leaving `dot` in `direction`, if the neighbour is on `grid`.
    pub fn from_dot(dot: Dot, direction: Direction, grid: &Grid) -> Option<Self> {
        let neighbour = dot.step(direction, grid)?;
        Self::between(dot, neighbour)
    }

    /// Lower endpoint.
    pub fn start(&self) -> Dot {
        self.from
    }

    /// Upper endpoint.
    pub fn end(&self) -> Dot {
        self.to
    }

    /// Horizontal iff both endpoints share a row.
    pub fn orientation(&self) -> Orientation {
        if self.from.y == self.to.y {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// True if both endpoints lie on `grid`.
    pub fn in_bounds(&self, grid: &Grid) -> bool {
        // `to` dominates `from` on both axes.
        grid.contains(self.to)
    }

    /// Position in the grid's edge enumeration: horizontal edges row-major,
    /// then vertical edges row-major.
    pub fn index(&self, grid: &Grid) -> Option<usize> {
        if !self.in_bounds(grid) {
            return None;
        }
        let Dot { x, y } = self.from;
        Some(match self.orientation() {
            Orientation::Horizontal => y * (grid.cols() - 1) + x,
            Orientation::Vertical => grid.horizontal_edge_count() + y * grid.cols() + x,
        })
    }

    /// Inverse of [`Edge::index`].
    pub fn from_index(grid: &Grid, index: usize) -> Option<Self> {
        let horizontal = grid.horizontal_edge_count();
        if index < horizontal {
            let width = grid.cols() - 1;
            Some(Self::horizontal(index % width, index / width))
        } else if index < grid.edge_count() {
            let offset = index - horizontal;
            Some(Self::vertical(offset % grid.cols(), offset / grid.cols()))
        } else {
            None
        }
    }

    /// Boxes this edge borders: above/below for horizontal edges, left/right
    /// for vertical ones. At most two.
    pub fn adjacent_cells(&self, grid: &Grid) -> impl Iterator<Item = Cell> {
        let Dot { x, y } = self.from;
        let pair = match self.orientation() {
            Orientation::Horizontal => [
                (y > 0).then(|| Cell::new(x, y - 1)),
                (y < grid.rows() - 1).then(|| Cell::new(x, y)),
            ],
            Orientation::Vertical => [
                (x > 0).then(|| Cell::new(x - 1, y)),
                (x < grid.cols() - 1).then(|| Cell::new(x, y)),
            ],
        };
        pair.into_iter().flatten()
    }
}

/// Error parsing an edge or box key.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed id {:?}: {}", input, reason)]
pub struct KeyParseError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl KeyParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

fn parse_dot(s: &str, input: &str) -> Result<Dot, KeyParseError> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| KeyParseError::new(input, "expected `x,y`"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| KeyParseError::new(input, "coordinate is not a non-negative integer"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| KeyParseError::new(input, "coordinate is not a non-negative integer"))?;
    Ok(Dot::new(x, y))
}

impl FromStr for Edge {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| KeyParseError::new(s, "expected `x1,y1-x2,y2`"))?;
        let a = parse_dot(a, s)?;
        let b = parse_dot(b, s)?;
        Edge::between(a, b).ok_or_else(|| KeyParseError::new(s, "dots are not adjacent"))
    }
}

impl From<Edge> for String {
    fn from(edge: Edge) -> Self {
        edge.to_string()
    }
}

impl TryFrom<String> for Edge {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A box, identified by its top-left dot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("{x},{y}")]
pub struct Cell {
    /// Column of the top-left dot.
    pub x: usize,
    /// Row of the top-left dot.
    pub y: usize,
}

impl Cell {
    /// Creates a box id.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Bounding edges in scan order: top, right, bottom, left.
    pub fn sides(&self) -> [Edge; 4] {
        let Cell { x, y } = *self;
        [
            Edge::horizontal(x, y),
            Edge::vertical(x.saturating_add(1), y),
            Edge::horizontal(x, y.saturating_add(1)),
            Edge::vertical(x, y),
        ]
    }

    /// True if the box lies on `grid`.
    pub fn in_bounds(&self, grid: &Grid) -> bool {
        self.x < grid.cols() - 1 && self.y < grid.rows() - 1
    }

    /// Row-major position in the grid's box enumeration.
    pub fn index(&self, grid: &Grid) -> Option<usize> {
        self.in_bounds(grid)
            .then(|| self.y * (grid.cols() - 1) + self.x)
    }

    /// Inverse of [`Cell::index`].
    pub fn from_index(grid: &Grid, index: usize) -> Option<Self> {
        let width = grid.cols() - 1;
        (index < grid.box_count()).then(|| Self::new(index % width, index / width))
    }
}

impl FromStr for Cell {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dot = parse_dot(s, s)?;
        Ok(Self::new(dot.x, dot.y))
    }
}

impl Grid {
    /// Every edge, in enumeration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.edge_count()).filter_map(move |i| Edge::from_index(self, i))
    }

    /// Every box, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.box_count()).filter_map(move |i| Cell::from_index(self, i))
    }
}
