//! Recording file format.
//!
//! A recording is a JSON document:
//!
//! ```text
//! {
//!   "config": { "cols": 80, "rows": 24, "frameDelay": "auto", "maxIdleTime": 2000 },
//!   "frames": [ { "content": "$ ls\r\n", "delay": 120 }, ... ],
//!   "thumbnail": { ...optional precomputed buffer snapshot... }
//! }
//! ```
//!
//! `records` is accepted in place of `frames`. Config keys the engine does
//! not use (themes, fonts, frame boxes, watermarks) are ignored.
//!
//! # Structure
//!
//! - `reader` - Parsing recordings from paths, readers and strings

mod reader;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DelaySetting;
use crate::surface::BufferSnapshot;

/// One recorded output chunk and the delay recorded before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub content: String,
    /// Milliseconds.
    pub delay: f64,
}

impl RawFrame {
    pub fn new(content: impl Into<String>, delay: f64) -> Self {
        Self {
            content: content.into(),
            delay,
        }
    }
}

/// The `config` object embedded in a recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingConfig {
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub cols: Option<usize>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub rows: Option<usize>,
    #[serde(default)]
    pub frame_delay: Option<DelaySetting>,
    #[serde(default)]
    pub max_idle_time: Option<DelaySetting>,
    #[serde(default)]
    pub speed_factor: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub repeat: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub autoplay: Option<bool>,
}

/// A parsed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub config: RecordingConfig,
    pub frames: Vec<RawFrame>,
    /// Precomputed first paint, applied instead of replaying to the thumbnail time.
    pub thumbnail: Option<BufferSnapshot>,
}

impl Recording {
    pub fn new(frames: Vec<RawFrame>) -> Self {
        Self {
            config: RecordingConfig::default(),
            frames,
            thumbnail: None,
        }
    }

    pub fn with_config(mut self, config: RecordingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sum of the recorded (unadjusted) delays in milliseconds.
    pub fn recorded_duration(&self) -> f64 {
        self.frames.iter().map(|f| f.delay).sum()
    }
}

/// Dimensions are sometimes recorded as `"auto"`; treat anything that is
/// not a positive integer as unset.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok()))
}

/// Terminalizer configs use a numeric `repeat` for GIF loop counts; only
/// real booleans are meaningful to the player.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}
