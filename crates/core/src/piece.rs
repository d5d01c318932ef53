//! Active piece state: shape matrix plus board-relative offset.

use crate::pieces::shape_of;
use crate::shape::Shape;
use crate::types::{PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Active falling piece
///
/// `shape` already has the current rotation applied; `rotation` records which
/// orientation that is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Spawn orientation at the spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_ROW, SPAWN_COL)
    }

    /// Spawn orientation at an explicit offset.
    pub fn at(kind: PieceKind, row: i8, col: i8) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            rotation: Rotation::North,
            row,
            col,
        }
    }

    /// Absolute grid coordinates of the occupied sub-cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(i, j)| (self.row + i, self.col + j))
    }

    pub fn moved(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }
}
