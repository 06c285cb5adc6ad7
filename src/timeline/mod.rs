//! Playback timeline.
//!
//! Frames are placed on one continuous axis in milliseconds. Each frame
//! stays on screen for the delay recorded *after* it, so frame `i` lasts
//! `adjusted_delay[i + 1]` and the final frame borrows the first frame's
//! delay. Intervals are half-open `[start_time, end_time)` except that the
//! final frame also owns `total_duration`.
//!
//! # Structure
//!
//! - `normalize` - Delay adjustment (fixed delay, idle cap, speed factor)
//! - `locate` - Mapping a time to the frame whose interval contains it

mod locate;
mod normalize;

pub use normalize::{adjust_delay, normalize};

use crate::config::TimingConfig;
use crate::error::{PlayerError, Result};
use crate::recording::RawFrame;

/// A frame placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub content: String,
    /// Delay as recorded.
    pub delay: f64,
    /// Delay after normalization.
    pub adjusted_delay: f64,
    pub start_time: f64,
    pub end_time: f64,
    /// Time on screen: the next frame's adjusted delay.
    pub duration: f64,
}

/// Ordered frames with assigned timing.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    frames: Vec<Frame>,
    total_duration: f64,
}

impl Timeline {
    /// Normalize delays and assign timing in one step.
    pub fn build(raw: Vec<RawFrame>, timing: &TimingConfig) -> Result<Self> {
        Self::from_normalized(normalize(raw, timing))
    }

    /// Assign `start_time`, `end_time` and `duration` to normalized frames.
    ///
    /// # Errors
    ///
    /// `InvalidRecording` when there are no frames or an adjusted delay is
    /// negative or not finite.
    pub fn from_normalized(mut frames: Vec<Frame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(PlayerError::InvalidRecording(
                "recording has no frames".to_string(),
            ));
        }
        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| !f.adjusted_delay.is_finite() || f.adjusted_delay < 0.0)
        {
            return Err(PlayerError::InvalidRecording(format!(
                "frame {} has invalid adjusted delay {}",
                index, frame.adjusted_delay
            )));
        }

        let count = frames.len();
        let mut clock = 0.0;
        for index in 0..count {
            let duration = frames[(index + 1) % count].adjusted_delay;
            let frame = &mut frames[index];
            frame.duration = duration;
            frame.start_time = clock;
            frame.end_time = clock + duration;
            clock = frame.end_time;
        }

        tracing::debug!(frames = count, total_duration = clock, "Built timeline");

        Ok(Self {
            frames,
            total_duration: clock,
        })
    }

    /// Milliseconds from the first frame to the end of the last one.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; an empty timeline cannot be built.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Concatenated content of frames `from..=to`, clamped to the timeline.
    pub fn content_range(&self, from: usize, to: usize) -> String {
        let end = to.min(self.last_index());
        if from > end {
            return String::new();
        }
        self.frames[from..=end]
            .iter()
            .map(|f| f.content.as_str())
            .collect()
    }
}
