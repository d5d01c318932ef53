//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the engine, the
//! input layer and the terminal renderer can share them freely.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: row 0, column `BOARD_WIDTH / 2`
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 60 | Fixed tick rate |
//! | `DEFAULT_GRAVITY_TICKS` | 10 | Ticks between forced downward moves |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn row for new pieces.
pub const SPAWN_ROW: i8 = 0;

/// Spawn column for new pieces.
pub const SPAWN_COL: i8 = (BOARD_WIDTH / 2) as i8;

/// Default tick rate (steps per second).
pub const DEFAULT_FPS: u32 = 60;

/// Default number of ticks between gravity moves.
pub const DEFAULT_GRAVITY_TICKS: u32 = 10;

/// Largest piece bounding box edge.
pub const MAX_SHAPE_DIM: usize = 4;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case letter used in logs and the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Orientation index of the active piece.
///
/// The shape matrix already carries the rotation; this index only exists so a
/// kick strategy can tell which transition is being attempted.
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use tick_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate 180°
    pub fn rotate_half(&self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// Orientation index 0-3.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// One-cell translation of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    /// `(d_row, d_col)` offset for this direction.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }
}

/// Matrix rotation applied to the active shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateKind {
    /// 90° clockwise
    Cw,
    /// 90° counter-clockwise
    Ccw,
    /// 180°
    Half,
}

impl RotateKind {
    /// Orientation reached from `from` after this rotation.
    pub fn apply(&self, from: Rotation) -> Rotation {
        match self {
            RotateKind::Cw => from.rotate_cw(),
            RotateKind::Ccw => from.rotate_ccw(),
            RotateKind::Half => from.rotate_half(),
        }
    }
}

/// Game actions that can be applied to the game state
///
/// Each action maps to one rules-engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 180°
    RotateHalf,
    /// Start over with an empty grid
    Reset,
}

impl GameAction {
    /// Every action, in key-binding order.
    pub const ALL: [GameAction; 8] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::RotateHalf,
        GameAction::Reset,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use tick_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotatehalf"), Some(GameAction::RotateHalf));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotatehalf" => Some(GameAction::RotateHalf),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::RotateHalf => "rotateHalf",
            GameAction::Reset => "reset",
        }
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    /// A freshly spawned piece overlapped the stack. Only a reset leaves this state.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_column_is_grid_midpoint() {
        assert_eq!(SPAWN_COL, 5);
        assert_eq!(SPAWN_ROW, 0);
    }

    #[test]
    fn rotation_half_is_two_quarter_turns() {
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(r.rotate_half(), r.rotate_cw().rotate_cw());
            assert_eq!(r.rotate_half().rotate_half(), r);
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn action_names_roundtrip() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn direction_offsets() {
        assert_eq!(Direction::Down.offset(), (1, 0));
        assert_eq!(Direction::Up.offset(), (-1, 0));
        assert_eq!(Direction::Left.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (0, 1));
    }
}
