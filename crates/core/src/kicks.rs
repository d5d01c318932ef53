//! Kick strategies for rotation.
//!
//! When a rotated shape does not fit at the current offset, the rules engine
//! asks a [`KickTable`] for alternative `(d_row, d_col)` offsets and commits
//! the first one that validates. The engine's rotation contract does not
//! change with the table: an empty list means plain in-place rotation.

use std::fmt::Debug;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Maximum number of kick candidates per rotation.
pub const MAX_KICKS: usize = 5;

/// Ordered `(d_row, d_col)` candidates.
pub type KickOffsets = ArrayVec<(i8, i8), MAX_KICKS>;

/// Source of kick offsets for a rotation transition.
pub trait KickTable: Debug + Send + Sync {
    /// Offsets to try, in order, after the in-place rotation failed.
    fn offsets(&self, kind: PieceKind, from: Rotation, to: Rotation) -> KickOffsets;
}

/// No kicks: a blocked rotation simply fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKicks;

impl KickTable for NoKicks {
    fn offsets(&self, _kind: PieceKind, _from: Rotation, _to: Rotation) -> KickOffsets {
        KickOffsets::new()
    }
}

/// Small symmetric kick list: one column either way, one row up, then two
/// columns either way. O pieces never kick.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicKicks;

const BASIC_OFFSETS: [(i8, i8); MAX_KICKS] = [(0, 1), (0, -1), (-1, 0), (0, 2), (0, -2)];

impl KickTable for BasicKicks {
    fn offsets(&self, kind: PieceKind, from: Rotation, to: Rotation) -> KickOffsets {
        if kind == PieceKind::O || from == to {
            return KickOffsets::new();
        }
        BASIC_OFFSETS.into_iter().collect()
    }
}

/// Named kick strategies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KickMode {
    #[default]
    None,
    Basic,
}

impl KickMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Some(KickMode::None),
            "basic" => Some(KickMode::Basic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KickMode::None => "none",
            KickMode::Basic => "basic",
        }
    }

    pub fn table(&self) -> Arc<dyn KickTable> {
        match self {
            KickMode::None => Arc::new(NoKicks),
            KickMode::Basic => Arc::new(BasicKicks),
        }
    }
}
