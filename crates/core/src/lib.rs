//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the game rules and state. It has no dependencies on the
//! terminal, the keyboard or the clock, which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is exercised by unit tests
//! - **Allocation-free** on the hot path: shapes are fixed 4x4 matrices
//!
//! # Module Structure
//!
//! - [`shape`]: boolean piece matrices and their rotation transforms
//! - [`pieces`]: the seven-piece shape library and random selection
//! - [`grid`]: 20x10 occupancy grid with line clearing
//! - [`piece`]: the active piece (shape, orientation, offset)
//! - [`game_state`]: the rules engine (validity, move, rotate, drops, lock, reset)
//! - [`kicks`]: pluggable rotation kick strategies (none by default)
//! - [`tick`]: fixed-step controller applying input and gravity
//! - [`rng`]: seeded LCG
//! - [`snapshot`]: render-facing copy of the state
//!
//! # Game Rules
//!
//! - A piece may only occupy in-bounds empty cells; every mutation is checked.
//! - A blocked downward move locks the piece, clears full rows (1 point each)
//!   and spawns a random piece at row 0, column 5.
//! - Rotation happens in place; if it collides it fails (unless a kick table
//!   is configured).
//! - If a new piece cannot spawn the game is over until reset.
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::GameState;
//! use tick_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.grid().occupied_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```

pub mod game_state;
pub mod grid;
pub mod kicks;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod shape;
pub mod snapshot;
pub mod tick;

pub use tick_tetris_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, LockReport, MoveOutcome};
pub use grid::{Grid, GridError};
pub use kicks::{BasicKicks, KickMode, KickTable, NoKicks};
pub use piece::ActivePiece;
pub use pieces::{random_kind, shape_of};
pub use rng::SimpleRng;
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tick::{TickController, TickReport};
