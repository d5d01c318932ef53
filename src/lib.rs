//! Tick Tetris (workspace facade crate).
//!
//! Re-exports the engine crates under `tick_tetris::{core,input,term,types}`
//! and adds the process-level pieces: configuration, logging, and the
//! [`Session`] that wires the key slot to the tick loop.

pub mod config;
pub mod logging;
pub mod session;

pub use tick_tetris_core as core;
pub use tick_tetris_input as input;
pub use tick_tetris_term as term;
pub use tick_tetris_types as types;

pub use config::GameConfig;
pub use session::Session;
