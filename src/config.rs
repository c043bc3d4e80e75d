//! Command line options for a local game.
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::models::snake::{
    snake_game::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_SIZE, MIN_BOARD_SIZE},
    speed_curve::SpeedCurve,
};

/// Default time between clock pulses.
pub const TICK_INTERVAL_MS: u64 = 16;
/// Longest allowed time between clock pulses.
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBoardSize { width: i32, height: i32 },
    InvalidTickInterval(u64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBoardSize { width, height } => write!(
                f,
                "board must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE} cells per side, got {width}x{height}"
            ),
            ConfigError::InvalidTickInterval(ms) => write!(
                f,
                "tick interval must be between 1 and {MAX_TICK_INTERVAL_MS} ms, got {ms}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Named [`SpeedCurve`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SpeedPreset {
    #[default]
    Classic,
    Relaxed,
    Brisk,
}

impl SpeedPreset {
    #[must_use]
    pub fn curve(self) -> SpeedCurve {
        match self {
            SpeedPreset::Classic => SpeedCurve::CLASSIC,
            SpeedPreset::Relaxed => SpeedCurve::RELAXED,
            SpeedPreset::Brisk => SpeedCurve::BRISK,
        }
    }
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ticksnake", about = "Tick-driven snake")]
pub struct GameConfig {
    /// Board width in cells.
    #[arg(long, default_value_t = BOARD_WIDTH)]
    pub width: i32,
    /// Board height in cells.
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    pub height: i32,
    /// Milliseconds between clock pulses.
    #[arg(long, default_value_t = TICK_INTERVAL_MS)]
    pub tick_ms: u64,
    /// How quickly the snake speeds up as it eats.
    #[arg(long, value_enum, default_value_t = SpeedPreset::Classic)]
    pub speed: SpeedPreset,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl GameConfig {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first option that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !valid.contains(&self.width) || !valid.contains(&self.height) {
            return Err(ConfigError::InvalidBoardSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=MAX_TICK_INTERVAL_MS).contains(&self.tick_ms) {
            return Err(ConfigError::InvalidTickInterval(self.tick_ms));
        }
        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[must_use]
    pub fn speed_curve(&self) -> SpeedCurve {
        self.speed.curve()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick_ms: TICK_INTERVAL_MS,
            speed: SpeedPreset::Classic,
            log_level: "info".to_string(),
        }
    }
}
