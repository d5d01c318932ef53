use crate::piece::ActivePiece;
use crate::shape::Shape;
use crate::types::{GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl ActiveSnapshot {
    /// Absolute grid coordinates of the occupied sub-cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(i, j)| (self.row + i, self.col + j))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

/// Read-only copy of everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[bool; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub status: GameStatus,
    /// Tick counter at capture time, filled in by the tick loop.
    pub frame: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            pieces: 0,
            status: GameStatus::Playing,
            frame: 0,
        }
    }
}
