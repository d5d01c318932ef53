//! Terminal input module (engine-facing).
//!
//! Captures single-character key presses with `crossterm` on a blocking
//! thread and hands the most recent one to the tick loop through a
//! [`KeySlot`]. The character-to-action mapping is configuration
//! ([`KeyBindings`]); unbound keys are ignored.

pub mod capture;
pub mod map;
pub mod slot;

pub use tick_tetris_types as types;

pub use capture::{dispatch_key, run_capture, KeySource, TerminalKeys, DEFAULT_POLL_INTERVAL};
pub use map::{key_char, should_quit, BindingError, KeyBindings, QUIT_KEY};
pub use slot::{KeySlot, Shutdown};
