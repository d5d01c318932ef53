//! One play session: the game, its tick controller, and the shared state the
//! input thread writes into.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::{GameSnapshot, GameState, TickController, TickReport};
use crate::input::{KeyBindings, KeySlot, Shutdown};

pub struct Session {
    game: GameState,
    ticks: TickController,
    bindings: KeyBindings,
    slot: Arc<KeySlot>,
    shutdown: Arc<Shutdown>,
    snapshot: GameSnapshot,
}

impl Session {
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        let game = GameState::new(seed).with_kicks(config.kicks.table());
        info!(
            seed,
            fps = config.fps,
            gravity_ticks = config.gravity_ticks,
            kicks = config.kicks.as_str(),
            "session started"
        );
        let mut session = Self {
            game,
            ticks: TickController::new(config.gravity_ticks),
            bindings: config.keys,
            slot: Arc::new(KeySlot::new()),
            shutdown: Arc::new(Shutdown::new()),
            snapshot: GameSnapshot::default(),
        };
        session.refresh_snapshot();
        session
    }

    /// Handle for the input thread to write keys into.
    pub fn key_slot(&self) -> Arc<KeySlot> {
        Arc::clone(&self.slot)
    }

    pub fn shutdown_flag(&self) -> Arc<Shutdown> {
        Arc::clone(&self.shutdown)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_requested()
    }

    /// Run one tick: consume the latest key (if bound), step the game, and
    /// refresh the snapshot.
    pub fn tick(&mut self) -> TickReport {
        let action = self.slot.take().and_then(|key| {
            let action = self.bindings.action_for(key);
            if action.is_none() {
                debug!(key = ?key, "unbound key ignored");
            }
            action
        });

        let report = self.ticks.step(&mut self.game, action);
        self.refresh_snapshot();
        report
    }

    fn refresh_snapshot(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
        self.snapshot.frame = self.ticks.frame();
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn frame(&self) -> u64 {
        self.ticks.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActivePiece;
    use crate::types::{GameAction, PieceKind};

    fn session() -> Session {
        let mut s = Session::new(&GameConfig::default(), 7);
        assert!(s.game_mut().set_active(ActivePiece::spawn(PieceKind::T)));
        s
    }

    #[test]
    fn test_tick_consumes_latest_key_once() {
        let mut s = session();
        let slot = s.key_slot();
        slot.store('j');
        slot.store('l');

        let report = s.tick();
        assert_eq!(report.action, Some((GameAction::MoveRight, true)));
        assert_eq!(s.game().active().col, 6);

        let report = s.tick();
        assert_eq!(report.action, None);
        assert_eq!(s.game().active().col, 6);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut s = session();
        s.key_slot().store('z');
        let before = s.game().active();
        let report = s.tick();
        assert_eq!(report.action, None);
        assert_eq!(s.game().active(), before);
        assert!(s.key_slot().peek().is_none());
    }

    #[test]
    fn test_snapshot_tracks_frame() {
        let mut s = session();
        for _ in 0..3 {
            s.tick();
        }
        assert_eq!(s.snapshot().frame, 3);
        assert_eq!(s.frame(), 3);
    }

    #[test]
    fn test_shutdown_flag_is_shared() {
        let s = session();
        let flag = s.shutdown_flag();
        assert!(!s.is_shutting_down());
        flag.request();
        assert!(s.is_shutting_down());
    }
}
