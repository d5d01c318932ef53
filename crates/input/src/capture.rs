//! Blocking key-capture loop.
//!
//! Runs on its own thread, waiting for key presses and writing each one into
//! the shared [`KeySlot`]. The wait is bounded so the loop notices a shutdown
//! request even when no key arrives.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tracing::{debug, info, warn};

use crate::map::{key_char, should_quit};
use crate::slot::{KeySlot, Shutdown};

/// Default bound on each wait for a key.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source of key events.
pub trait KeySource {
    /// Wait up to `timeout` for the next key event. `Ok(None)` on timeout or
    /// non-key events.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Route one key event: quit keys raise the shutdown flag, character keys
/// overwrite the slot. Returns false once shutdown was requested.
pub fn dispatch_key(key: KeyEvent, slot: &KeySlot, shutdown: &Shutdown) -> bool {
    if should_quit(key) {
        info!("quit key pressed");
        shutdown.request();
        return false;
    }
    if let Some(c) = key_char(key) {
        debug!(key = ?c, "key captured");
        slot.store(c);
    }
    true
}

/// Capture keys until shutdown is requested or the source fails.
///
/// A failing source also requests shutdown, so the tick loop stops with it.
pub fn run_capture<S: KeySource>(
    source: &mut S,
    slot: &KeySlot,
    shutdown: &Shutdown,
    poll_interval: Duration,
) -> io::Result<()> {
    while !shutdown.is_requested() {
        let key = match source.next_key(poll_interval) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "key source failed");
                shutdown.request();
                return Err(err);
            }
        };
        if !dispatch_key(key, slot, shutdown) {
            break;
        }
    }
    Ok(())
}
