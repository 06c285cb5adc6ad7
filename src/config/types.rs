//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A delay option that is either derived from the recording or fixed.
///
/// Serialized as the string `"auto"` or a number of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DelayRepr", into = "DelayRepr")]
pub enum DelaySetting {
    #[default]
    Auto,
    Millis(f64),
}

impl DelaySetting {
    pub fn millis(self) -> Option<f64> {
        match self {
            DelaySetting::Auto => None,
            DelaySetting::Millis(ms) => Some(ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DelayRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DelayRepr> for DelaySetting {
    type Error = String;

    fn try_from(repr: DelayRepr) -> Result<Self, Self::Error> {
        match repr {
            DelayRepr::Number(ms) => Ok(DelaySetting::Millis(ms)),
            DelayRepr::Text(text) => text.parse(),
        }
    }
}

impl From<DelaySetting> for DelayRepr {
    fn from(setting: DelaySetting) -> Self {
        match setting {
            DelaySetting::Auto => DelayRepr::Text("auto".to_string()),
            DelaySetting::Millis(ms) => DelayRepr::Number(ms),
        }
    }
}

impl FromStr for DelaySetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(DelaySetting::Auto);
        }
        s.parse::<f64>()
            .map(DelaySetting::Millis)
            .map_err(|_| format!("expected \"auto\" or a number of milliseconds, got {:?}", s))
    }
}

impl fmt::Display for DelaySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelaySetting::Auto => f.write_str("auto"),
            DelaySetting::Millis(ms) => write!(f, "{}", ms),
        }
    }
}

/// How visual state is produced for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayStrategy {
    /// Write each frame's content to the surface in order.
    Sequential,
    /// Precompute every frame's full buffer once and apply snapshots.
    #[default]
    Snapshot,
}

impl FromStr for ReplayStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ReplayStrategy::Sequential),
            "snapshot" => Ok(ReplayStrategy::Snapshot),
            other => Err(format!(
                "unknown strategy {:?} (expected \"sequential\" or \"snapshot\")",
                other
            )),
        }
    }
}

impl fmt::Display for ReplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayStrategy::Sequential => f.write_str("sequential"),
            ReplayStrategy::Snapshot => f.write_str("snapshot"),
        }
    }
}

/// Inputs of the delay normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    pub frame_delay: DelaySetting,
    /// Ignored unless `frame_delay` is `Auto`.
    pub max_idle_time: DelaySetting,
    pub speed_factor: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_delay: DelaySetting::Auto,
            max_idle_time: DelaySetting::Auto,
            speed_factor: default_speed_factor(),
        }
    }
}

/// Main configuration structure (`~/.config/termreel/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// One layer of playback options.
///
/// Every field is optional so layers can be stacked: the user config file,
/// then command-line overrides. Unset fields fall through to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_delay: Option<DelaySetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_idle_time: Option<DelaySetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    /// Milliseconds into the recording shown before playback starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ReplayStrategy>,
    /// Milliseconds a render step may stay pending. Unset waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval_ms: Option<u64>,
    /// Frames replayed between scheduler yields while building snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_batch: Option<usize>,
}

impl PlaybackConfig {
    /// Stack `higher` on top of `self`; fields set in `higher` win.
    pub fn merged_with(&self, higher: &PlaybackConfig) -> PlaybackConfig {
        PlaybackConfig {
            frame_delay: higher.frame_delay.or(self.frame_delay),
            max_idle_time: higher.max_idle_time.or(self.max_idle_time),
            speed_factor: higher.speed_factor.or(self.speed_factor),
            repeat: higher.repeat.or(self.repeat),
            autoplay: higher.autoplay.or(self.autoplay),
            thumbnail_time: higher.thumbnail_time.or(self.thumbnail_time),
            strategy: higher.strategy.or(self.strategy),
            render_timeout_ms: higher.render_timeout_ms.or(self.render_timeout_ms),
            tick_interval_ms: higher.tick_interval_ms.or(self.tick_interval_ms),
            snapshot_batch: higher.snapshot_batch.or(self.snapshot_batch),
        }
    }
}

pub fn default_speed_factor() -> f64 {
    1.0
}

pub fn default_tick_interval_ms() -> u64 {
    1
}

pub fn default_snapshot_batch() -> usize {
    200
}

pub fn default_cols() -> usize {
    80
}

pub fn default_rows() -> usize {
    24
}
