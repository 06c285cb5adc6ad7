//! Configuration management
//!
//! Playback options come from three layers, lowest precedence first: the
//! recording's own `config` object, the user config file, and caller
//! overrides (command-line flags). [`PlayerOptions::resolve`] flattens them
//! into the validated values the engine runs with.

mod io;
mod types;

pub use io::CONFIG_ENV;
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PlayerError;
use crate::recording::RecordingConfig;

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Fully resolved options a player runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    pub timing: TimingConfig,
    pub repeat: bool,
    pub autoplay: bool,
    /// Milliseconds into the recording rendered as the first paint.
    pub thumbnail_time: f64,
    pub strategy: ReplayStrategy,
    /// How long a render step may stay pending before it is abandoned.
    pub render_timeout: Option<Duration>,
    pub tick_interval: Duration,
    pub snapshot_batch: usize,
    pub cols: usize,
    pub rows: usize,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            repeat: false,
            autoplay: false,
            thumbnail_time: 0.0,
            strategy: ReplayStrategy::default(),
            render_timeout: None,
            tick_interval: Duration::from_millis(default_tick_interval_ms()),
            snapshot_batch: default_snapshot_batch(),
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

impl PlayerOptions {
    /// Merge the recording's config with caller layers (later layers win).
    pub fn resolve(
        recording: &RecordingConfig,
        layers: &[&PlaybackConfig],
    ) -> Result<Self, PlayerError> {
        let base = PlaybackConfig {
            frame_delay: recording.frame_delay,
            max_idle_time: recording.max_idle_time,
            speed_factor: recording.speed_factor,
            repeat: recording.repeat,
            autoplay: recording.autoplay,
            ..PlaybackConfig::default()
        };
        let merged = layers
            .iter()
            .fold(base, |acc, layer| acc.merged_with(layer));

        let defaults = PlayerOptions::default();
        let options = PlayerOptions {
            timing: TimingConfig {
                frame_delay: merged.frame_delay.unwrap_or_default(),
                max_idle_time: merged.max_idle_time.unwrap_or_default(),
                speed_factor: merged.speed_factor.unwrap_or_else(default_speed_factor),
            },
            repeat: merged.repeat.unwrap_or(defaults.repeat),
            autoplay: merged.autoplay.unwrap_or(defaults.autoplay),
            thumbnail_time: merged.thumbnail_time.unwrap_or(defaults.thumbnail_time),
            strategy: merged.strategy.unwrap_or(defaults.strategy),
            render_timeout: merged.render_timeout_ms.map(Duration::from_millis),
            tick_interval: merged
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            snapshot_batch: merged.snapshot_batch.unwrap_or(defaults.snapshot_batch),
            cols: recording.cols.unwrap_or(defaults.cols),
            rows: recording.rows.unwrap_or(defaults.rows),
        };
        options.validate()?;
        Ok(options)
    }

    /// Reject values the timeline cannot be built from.
    pub fn validate(&self) -> Result<(), PlayerError> {
        let speed = self.timing.speed_factor;
        if !speed.is_finite() || speed < 0.0 {
            return Err(PlayerError::InvalidConfig(format!(
                "speedFactor must be a non-negative number, got {}",
                speed
            )));
        }
        for (name, setting) in [
            ("frameDelay", self.timing.frame_delay),
            ("maxIdleTime", self.timing.max_idle_time),
        ] {
            if let Some(ms) = setting.millis() {
                if !ms.is_finite() || ms < 0.0 {
                    return Err(PlayerError::InvalidConfig(format!(
                        "{} must be \"auto\" or a non-negative number, got {}",
                        name, ms
                    )));
                }
            }
        }
        if !self.thumbnail_time.is_finite() {
            return Err(PlayerError::InvalidConfig(
                "thumbnailTime must be a finite number".to_string(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(PlayerError::InvalidConfig(
                "tick interval must be at least 1 ms".to_string(),
            ));
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(PlayerError::InvalidConfig(format!(
                "terminal size must be non-zero, got {}x{}",
                self.cols, self.rows
            )));
        }
        Ok(())
    }
}
