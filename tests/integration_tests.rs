//! Integration tests for the tick loop: key slot, bindings, gravity and config

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use tick_tetris::core::{ActivePiece, MoveOutcome, TickController};
use tick_tetris::input::{dispatch_key, run_capture, KeyBindings, KeySlot, KeySource, Shutdown};
use tick_tetris::types::{GameAction, PieceKind, SPAWN_COL};
use tick_tetris::{GameConfig, Session};

fn session_with(kind: PieceKind, config: &GameConfig) -> Session {
    let mut session = Session::new(config, 12345);
    assert!(session.game_mut().set_active(ActivePiece::spawn(kind)));
    session
}

#[test]
fn test_gravity_every_kth_tick() {
    let mut session = session_with(PieceKind::T, &GameConfig::default());

    for frame in 1..=30u64 {
        let report = session.tick();
        assert_eq!(report.frame, frame);
        assert_eq!(report.gravity.is_some(), frame % 10 == 0, "frame {frame}");
    }
    assert_eq!(session.game().active().row, 3);
}

#[test]
fn test_one_action_per_tick() {
    let mut session = session_with(PieceKind::O, &GameConfig::default());
    let slot = session.key_slot();

    // Three presses between ticks collapse to the last one.
    slot.store('j');
    slot.store('j');
    slot.store('l');
    session.tick();
    assert_eq!(session.game().active().col, SPAWN_COL + 1);

    slot.store('j');
    session.tick();
    slot.store('j');
    session.tick();
    assert_eq!(session.game().active().col, SPAWN_COL - 1);
}

#[test]
fn test_uppercase_key_maps_like_lowercase() {
    let mut session = session_with(PieceKind::T, &GameConfig::default());
    session.key_slot().store('L');
    let report = session.tick();
    assert_eq!(report.action, Some((GameAction::MoveRight, true)));
}

#[test]
fn test_hard_drop_key_locks_and_scores_nothing() {
    let mut session = session_with(PieceKind::O, &GameConfig::default());
    session.key_slot().store(' ');

    let report = session.tick();

    assert_eq!(report.action, Some((GameAction::HardDrop, true)));
    assert_eq!(session.snapshot().score, 0);
    assert_eq!(session.snapshot().pieces, 2);
    assert_eq!(session.game().grid().occupied_count(), 4);
}

#[test]
fn test_custom_bindings_replace_defaults() {
    let mut keys = KeyBindings::default();
    keys.set(GameAction::MoveLeft, 'a');
    keys.set(GameAction::MoveRight, 'e');
    let config = GameConfig {
        keys,
        ..GameConfig::default()
    };
    config.validate().unwrap();

    let mut session = session_with(PieceKind::T, &config);
    session.key_slot().store('j');
    assert_eq!(session.tick().action, None);

    session.key_slot().store('a');
    assert_eq!(session.tick().action, Some((GameAction::MoveLeft, true)));
}

#[test]
fn test_gravity_locks_resting_piece() {
    let config = GameConfig {
        gravity_ticks: 1,
        ..GameConfig::default()
    };
    let mut session = session_with(PieceKind::O, &config);

    let mut locked = false;
    for _ in 0..19 {
        if let Some(MoveOutcome::Locked(_)) = session.tick().gravity {
            locked = true;
            break;
        }
    }
    assert!(locked);
    assert_eq!(session.game().grid().is_occupied(19, SPAWN_COL), Ok(true));
}

#[test]
fn test_capture_thread_feeds_tick_loop() {
    let mut session = session_with(PieceKind::T, &GameConfig::default());
    let slot = session.key_slot();
    let shutdown = session.shutdown_flag();

    let producer = thread::spawn(move || {
        dispatch_key(KeyEvent::from(KeyCode::Char('l')), &slot, &shutdown);
        dispatch_key(KeyEvent::from(KeyCode::Char('q')), &slot, &shutdown)
    });
    let still_running = producer.join().unwrap();

    assert!(!still_running);
    assert!(session.is_shutting_down());
    assert_eq!(session.tick().action, Some((GameAction::MoveRight, true)));
}

struct DeadTerminal;

impl KeySource for DeadTerminal {
    fn next_key(&mut self, _timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone"))
    }
}

#[test]
fn test_failed_capture_stops_session() {
    let session = session_with(PieceKind::T, &GameConfig::default());
    let slot = session.key_slot();
    let shutdown = session.shutdown_flag();

    let result = thread::spawn(move || run_capture(&mut DeadTerminal, &slot, &shutdown, Duration::ZERO))
        .join()
        .unwrap();

    assert!(result.is_err());
    assert!(session.is_shutting_down());
}

#[test]
fn test_slot_handoff_under_contention() {
    let slot = Arc::new(KeySlot::new());
    let stop = Arc::new(Shutdown::new());

    let writer = {
        let slot = Arc::clone(&slot);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            for key in "jlfsdk".chars().cycle().take(10_000) {
                slot.store(key);
            }
            stop.request();
        })
    };

    let mut seen = 0;
    while !stop.is_requested() {
        if let Some(key) = slot.take() {
            assert!("jlfsdk".contains(key));
            seen += 1;
        }
        thread::sleep(Duration::from_micros(10));
    }
    writer.join().unwrap();
    let _ = slot.take();

    assert!(seen <= 10_000);
    assert_eq!(slot.take(), None);
}

#[test]
fn test_tick_controller_counts_from_zero() {
    let ticks = TickController::new(0);
    assert_eq!(ticks.frame(), 0);
    assert_eq!(ticks.gravity_ticks(), 1);
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("tick-tetris-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "fps": 30, "gravity_ticks": 5, "seed": 99, "keys": { "hard_drop": "x" } }"#,
    )
    .unwrap();

    let config = GameConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.fps, 30);
    assert_eq!(config.gravity_ticks, 5);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.keys.hard_drop, 'x');
    assert_eq!(config.keys.move_left, 'j');
    config.validate().unwrap();
}

#[test]
fn test_config_rejects_quit_binding() {
    let config = GameConfig::from_json(r#"{ "keys": { "reset": "q" } }"#).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_config_file_is_error() {
    let err = GameConfig::from_file("/nonexistent/tick-tetris.json").unwrap_err();
    assert!(format!("{err:#}").contains("read config file"));
}
