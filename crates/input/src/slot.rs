//! Single-slot handoff between the key-capture thread and the tick loop.
//!
//! Not a queue: each press overwrites the previous one, and the tick loop
//! takes (reads and clears) whatever is there once per frame.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Value stored when the slot is empty. `'\0'` is never a bound key.
const EMPTY: u32 = 0;

/// Latest pressed key, last writer wins.
#[derive(Debug, Default)]
pub struct KeySlot {
    key: AtomicU32,
}

impl KeySlot {
    pub const fn new() -> Self {
        Self {
            key: AtomicU32::new(EMPTY),
        }
    }

    /// Overwrite the slot with `key`. `'\0'` clears it.
    pub fn store(&self, key: char) {
        self.key.store(key as u32, Ordering::Release);
    }

    /// Read and clear in one step.
    pub fn take(&self) -> Option<char> {
        match self.key.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            raw => char::from_u32(raw),
        }
    }

    /// Look at the slot without clearing it.
    pub fn peek(&self) -> Option<char> {
        match self.key.load(Ordering::Acquire) {
            EMPTY => None,
            raw => char::from_u32(raw),
        }
    }
}

/// Cooperative stop signal shared by the capture thread and the tick loop.
#[derive(Debug, Default)]
pub struct Shutdown {
    requested: AtomicBool,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
