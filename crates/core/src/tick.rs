//! Tick controller - fixed-step integration of input and gravity
//!
//! Each step applies at most one pending action and, every `gravity_ticks`
//! steps, forces a downward move. Real-time pacing is the caller's job; this
//! type only counts frames, so it can be driven directly from tests.

use crate::game_state::{GameState, MoveOutcome};
use crate::types::{GameAction, DEFAULT_GRAVITY_TICKS};

/// What happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    /// The action that was consumed, if any, and whether it changed state.
    pub action: Option<(GameAction, bool)>,
    /// Outcome of the gravity move on gravity frames.
    pub gravity: Option<MoveOutcome>,
}

#[derive(Debug, Clone)]
pub struct TickController {
    frame: u64,
    gravity_ticks: u32,
}

impl TickController {
    /// `gravity_ticks` of 0 is treated as 1 (gravity every frame).
    pub fn new(gravity_ticks: u32) -> Self {
        Self {
            frame: 0,
            gravity_ticks: gravity_ticks.max(1),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn gravity_ticks(&self) -> u32 {
        self.gravity_ticks
    }

    /// Whether `frame` is a gravity frame.
    pub fn is_gravity_frame(&self, frame: u64) -> bool {
        frame % self.gravity_ticks as u64 == 0
    }

    /// Advance one frame.
    pub fn step(&mut self, game: &mut GameState, pending: Option<GameAction>) -> TickReport {
        self.frame = self.frame.wrapping_add(1);

        let action = pending.map(|a| (a, game.apply_action(a)));

        let gravity = if self.is_gravity_frame(self.frame) {
            Some(game.soft_drop())
        } else {
            None
        };

        TickReport {
            frame: self.frame,
            action,
            gravity,
        }
    }
}

impl Default for TickController {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ActivePiece;
    use crate::types::PieceKind;

    #[test]
    fn test_gravity_every_kth_frame() {
        let mut game = GameState::new(1);
        assert!(game.set_active(ActivePiece::at(PieceKind::T, 0, 3)));
        let mut tick = TickController::new(10);

        for _ in 0..9 {
            let report = tick.step(&mut game, None);
            assert!(report.gravity.is_none());
        }
        assert_eq!(game.active().row, 0);

        let report = tick.step(&mut game, None);
        assert_eq!(report.frame, 10);
        assert_eq!(report.gravity, Some(MoveOutcome::Moved));
        assert_eq!(game.active().row, 1);
    }

    #[test]
    fn test_action_applied_before_gravity() {
        let mut game = GameState::new(1);
        assert!(game.set_active(ActivePiece::at(PieceKind::O, 0, 4)));
        let mut tick = TickController::new(1);

        let report = tick.step(&mut game, Some(GameAction::MoveLeft));
        assert_eq!(report.action, Some((GameAction::MoveLeft, true)));
        assert_eq!(report.gravity, Some(MoveOutcome::Moved));
        assert_eq!((game.active().row, game.active().col), (1, 3));
    }

    #[test]
    fn test_zero_gravity_ticks_clamped() {
        let tick = TickController::new(0);
        assert_eq!(tick.gravity_ticks(), 1);
    }
}
