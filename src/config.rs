//! Runtime configuration.
//!
//! Defaults, then an optional JSON file named by `TICK_TETRIS_CONFIG`, then
//! individual `TICK_TETRIS_*` environment overrides. The result is validated
//! once at startup.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::KickMode;
use crate::input::KeyBindings;
use crate::logging::parse_level;
use crate::types::{DEFAULT_FPS, DEFAULT_GRAVITY_TICKS};

pub const CONFIG_PATH_ENV: &str = "TICK_TETRIS_CONFIG";
pub const FPS_ENV: &str = "TICK_TETRIS_FPS";
pub const GRAVITY_TICKS_ENV: &str = "TICK_TETRIS_GRAVITY_TICKS";
pub const SEED_ENV: &str = "TICK_TETRIS_SEED";
pub const KICKS_ENV: &str = "TICK_TETRIS_KICKS";
pub const LOG_PATH_ENV: &str = "TICK_TETRIS_LOG_PATH";
pub const LOG_LEVEL_ENV: &str = "TICK_TETRIS_LOG_LEVEL";

pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks per second.
    pub fps: u32,
    /// Gravity fires every `gravity_ticks` ticks.
    pub gravity_ticks: u32,
    /// Fixed RNG seed; the clock is used when absent.
    pub seed: Option<u32>,
    #[serde(with = "kick_mode")]
    pub kicks: KickMode,
    /// Log file. No logging at all when absent.
    pub log_path: Option<String>,
    pub log_level: String,
    pub keys: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            gravity_ticks: DEFAULT_GRAVITY_TICKS,
            seed: None,
            kicks: KickMode::default(),
            log_path: None,
            log_level: "info".to_string(),
            keys: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Load from the process environment and validate.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(CONFIG_PATH_ENV)) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    /// Parse JSON; missing fields keep their defaults. Not validated.
    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text).context("invalid config JSON")?;
        Ok(config)
    }

    /// Apply `TICK_TETRIS_*` overrides. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_empty(lookup(FPS_ENV)) {
            self.fps = v.parse().with_context(|| format!("{FPS_ENV}={v}"))?;
        }
        if let Some(v) = non_empty(lookup(GRAVITY_TICKS_ENV)) {
            self.gravity_ticks = v
                .parse()
                .with_context(|| format!("{GRAVITY_TICKS_ENV}={v}"))?;
        }
        if let Some(v) = non_empty(lookup(SEED_ENV)) {
            self.seed = Some(v.parse().with_context(|| format!("{SEED_ENV}={v}"))?);
        }
        if let Some(v) = non_empty(lookup(KICKS_ENV)) {
            self.kicks = KickMode::from_str(&v)
                .with_context(|| format!("{KICKS_ENV}={v}: expected \"none\" or \"basic\""))?;
        }
        if let Some(v) = non_empty(lookup(LOG_PATH_ENV)) {
            self.log_path = Some(v);
        }
        if let Some(v) = non_empty(lookup(LOG_LEVEL_ENV)) {
            self.log_level = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FPS).contains(&self.fps) {
            bail!("fps must be in 1..={MAX_FPS}, got {}", self.fps);
        }
        if self.gravity_ticks == 0 {
            bail!("gravity_ticks must be at least 1");
        }
        self.keys.validate().context("invalid key bindings")?;
        parse_level(&self.log_level)?;
        Ok(())
    }

    /// Wall-clock length of one tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `KickMode` as its lowercase name.
mod kick_mode {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::KickMode;

    pub fn serialize<S: Serializer>(mode: &KickMode, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KickMode, D::Error> {
        let name = String::deserialize(d)?;
        KickMode::from_str(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown kick mode {name:?}")))
    }
}
