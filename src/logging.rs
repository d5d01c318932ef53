//! Log setup.
//!
//! Stdout is the game display, so logs only go to a file, and only when one
//! is configured.

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use crate::config::GameConfig;

/// Install the global subscriber if `log_path` is set. Returns whether one
/// was installed.
pub fn init(config: &GameConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let level = parse_level(&config.log_level)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .try_init()
        .context("install log subscriber")?;

    info!("Logging initialized at level: {}", level);
    Ok(true)
}

/// Accepts level names (`debug`) and verbosity numbers (`1` = error .. `5` = trace).
pub fn parse_level(name: &str) -> Result<Level> {
    Level::from_str(name.trim()).map_err(|_| anyhow::anyhow!("unknown log level {name:?}"))
}
