//! Terminal game renderer.
//!
//! Renders into a plain framebuffer which is then flushed to the terminal
//! backend. There are no widgets or layout engine: one board view and a small
//! side panel.
//!
//! - `game_view` is pure and unit-testable
//! - `renderer` owns the terminal and only writes changed cells
//! - board cells are 2 columns wide by default to keep them roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, ACTIVE_GLYPH, EMPTY_GLYPH, LOCKED_GLYPH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
