//! Terminal Tetris runner (default binary).
//!
//! Ticks on the tokio runtime at a fixed rate; keys are captured on a
//! blocking thread and handed over through the session's key slot.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use tick_tetris::input::{run_capture, TerminalKeys, DEFAULT_POLL_INTERVAL};
use tick_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tick_tetris::{logging, GameConfig, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    logging::init(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config).await;

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("terminal restore failed: {err:#}");
    }
    result
}

async fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut session = Session::new(config, seed);

    let slot = session.key_slot();
    let shutdown = session.shutdown_flag();
    let capture = tokio::task::spawn_blocking(move || {
        let mut keys = TerminalKeys;
        run_capture(&mut keys, &slot, &shutdown, DEFAULT_POLL_INTERVAL)
    });

    let result = tick_loop(term, config, &mut session).await;

    session.request_shutdown();
    let captured = capture.await.context("input thread panicked")?;
    info!(frames = session.frame(), "session ended");

    result?;
    captured.context("read terminal input")
}

async fn tick_loop(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    session: &mut Session,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut interval = time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if session.is_shutting_down() {
            return Ok(());
        }

        session.tick();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(session.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
