//! Game state module - the rules engine
//!
//! Ties the grid, the active piece and the RNG together. Every operation that
//! changes the piece's position or shape goes through [`GameState::valid`]
//! first; a rejected move is a normal outcome, not an error.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::grid::Grid;
use crate::kicks::{KickTable, NoKicks};
use crate::piece::ActivePiece;
use crate::pieces::random_kind;
use crate::rng::SimpleRng;
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Direction, GameAction, GameStatus, RotateKind};

/// Result of a lock: rows cleared and whether the next piece could spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub lines_cleared: usize,
    pub spawned: bool,
}

/// Result of a single-cell move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// The target was invalid; nothing changed.
    Blocked,
    /// A downward move was blocked, so the piece locked.
    Locked(LockReport),
    /// The game is over; nothing changed.
    Halted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: ActivePiece,
    score: u32,
    lines: u32,
    /// Pieces spawned since the last reset, the current one included.
    pieces: u32,
    status: GameStatus,
    rng: SimpleRng,
    kicks: Arc<dyn KickTable>,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::with_grid(Grid::new(), seed)
    }

    /// Start from a pre-filled grid.
    pub fn with_grid(grid: Grid, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = random_kind(&mut rng);
        let mut state = Self {
            grid,
            active: ActivePiece::spawn(first),
            score: 0,
            lines: 0,
            pieces: 0,
            status: GameStatus::Playing,
            rng,
            kicks: Arc::new(NoKicks),
        };
        state.enter_spawned(state.active);
        state
    }

    /// Replace the kick strategy used by [`GameState::rotate`].
    pub fn with_kicks(mut self, kicks: Arc<dyn KickTable>) -> Self {
        self.kicks = kicks;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Placement validity: every occupied sub-cell of `shape` at `(row, col)`
    /// lies inside the grid over an empty cell. Empty shapes are always valid.
    pub fn valid(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape.cells().all(|(i, j)| match (row.checked_add(i), col.checked_add(j)) {
            (Some(r), Some(c)) => self.grid.is_free(r, c),
            _ => false,
        })
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.valid(&piece.shape, piece.row, piece.col)
    }

    /// Move the active piece one cell. A blocked downward move locks it.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_game_over() {
            return MoveOutcome::Halted;
        }

        let (d_row, d_col) = direction.offset();
        let candidate = self.active.moved(d_row, d_col);
        if self.fits(&candidate) {
            self.active = candidate;
            return MoveOutcome::Moved;
        }

        match direction {
            Direction::Down => MoveOutcome::Locked(self.lock_piece()),
            _ => MoveOutcome::Blocked,
        }
    }

    /// Rotate the active piece in place, falling back to the kick table.
    ///
    /// Returns false (and leaves the piece untouched) when no candidate fits.
    pub fn rotate(&mut self, kind: RotateKind) -> bool {
        if self.is_game_over() {
            return false;
        }

        let from = self.active.rotation;
        let rotated = ActivePiece {
            shape: self.active.shape.rotated(kind),
            rotation: kind.apply(from),
            ..self.active
        };

        if self.fits(&rotated) {
            self.active = rotated;
            return true;
        }

        let kicks = self.kicks.offsets(rotated.kind, from, rotated.rotation);
        for (d_row, d_col) in kicks {
            let kicked = rotated.moved(d_row, d_col);
            if self.fits(&kicked) {
                debug!(d_row, d_col, "rotation kicked");
                self.active = kicked;
                return true;
            }
        }

        false
    }

    /// One explicit downward step; locks immediately if blocked.
    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.move_piece(Direction::Down)
    }

    /// Drop to the lowest valid row and lock there.
    ///
    /// Returns `None` when the game is over.
    pub fn hard_drop(&mut self) -> Option<LockReport> {
        if self.is_game_over() {
            return None;
        }

        let mut distance: u8 = 0;
        loop {
            let next = self.active.moved(1, 0);
            if !self.fits(&next) {
                break;
            }
            self.active = next;
            distance += 1;
        }

        debug!(distance, row = self.active.row, "hard drop");
        Some(self.lock_piece())
    }

    /// Merge the active piece into the grid, clear full rows, score them and
    /// spawn the next piece. Does nothing once the game is over.
    pub(crate) fn lock_piece(&mut self) -> LockReport {
        if self.is_game_over() {
            return LockReport {
                lines_cleared: 0,
                spawned: false,
            };
        }

        let piece = self.active;
        for (row, col) in piece.cells() {
            if let Err(err) = self.grid.occupy(row, col) {
                warn!(%err, "locked cell outside the grid");
            }
        }

        let cleared = self.grid.clear_full_rows();
        let lines_cleared = cleared.len();
        if lines_cleared > 0 {
            self.score += lines_cleared as u32;
            self.lines += lines_cleared as u32;
            info!(
                lines = lines_cleared,
                rows = ?cleared.as_slice(),
                score = self.score,
                "lines cleared"
            );
        }

        debug!(
            kind = piece.kind.as_str(),
            row = piece.row,
            col = piece.col,
            "piece locked"
        );

        let spawned = self.spawn_piece();
        LockReport {
            lines_cleared,
            spawned,
        }
    }

    /// Spawn a uniformly random piece at the spawn position.
    ///
    /// Returns false and ends the game when it overlaps the stack.
    pub(crate) fn spawn_piece(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let kind = random_kind(&mut self.rng);
        self.enter_spawned(ActivePiece::spawn(kind))
    }

    fn enter_spawned(&mut self, piece: ActivePiece) -> bool {
        self.active = piece;
        self.pieces = self.pieces.wrapping_add(1);

        if !self.fits(&piece) {
            self.status = GameStatus::GameOver;
            info!(
                kind = piece.kind.as_str(),
                score = self.score,
                lines = self.lines,
                "game over: spawn blocked"
            );
            return false;
        }

        debug!(kind = piece.kind.as_str(), "piece spawned");
        true
    }

    /// Replace the active piece if it fits where it is.
    ///
    /// Used for scripted setups; the status is left unchanged.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if !self.fits(&piece) {
            return false;
        }
        self.active = piece;
        true
    }

    /// Empty grid, zero score, fresh piece.
    ///
    /// The RNG stream continues, so the new game gets a new piece sequence.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.status = GameStatus::Playing;
        self.spawn_piece();
        info!("game reset");
    }

    /// Apply a game action; returns whether the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left) == MoveOutcome::Moved,
            GameAction::MoveRight => self.move_piece(Direction::Right) == MoveOutcome::Moved,
            GameAction::SoftDrop => matches!(
                self.soft_drop(),
                MoveOutcome::Moved | MoveOutcome::Locked(_)
            ),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.rotate(RotateKind::Cw),
            GameAction::RotateCcw => self.rotate(RotateKind::Ccw),
            GameAction::RotateHalf => self.rotate(RotateKind::Half),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.grid.rows();
        out.active = Some(ActiveSnapshot::from(self.active));
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
