//! Grid coordinates and compass directions.
//!
//! Coordinates are `(column, row)` pairs. They are signed so that callers can
//! describe positions outside a board (a selection off the edge, a ray that has
//! walked past the border) without wrapping.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The eight compass and diagonal step offsets, as `(column, row)` deltas.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A `(column, row)` position on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column, counted from the left edge.
    pub column: i32,
    /// Row, counted from the top edge.
    pub row: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Offset this coordinate by a `(column, row)` delta.
    #[must_use]
    pub const fn offset(self, (dc, dr): (i32, i32)) -> Self {
        Self {
            column: self.column + dc,
            row: self.row + dr,
        }
    }

    /// All eight neighbours, in [`DIRECTIONS`] order. May lie off the board.
    #[must_use]
    pub fn neighbours(self) -> SmallVec<[Coord; 8]> {
        DIRECTIONS.iter().map(|&d| self.offset(d)).collect()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}
