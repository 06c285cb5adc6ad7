//! Delay normalization.
//!
//! Recorded delays are rewritten before timing is assigned:
//!
//! - a fixed `frame_delay` replaces every delay,
//! - otherwise a fixed `max_idle_time` caps long pauses,
//! - the result is scaled by `speed_factor`.

use super::Frame;
use crate::config::{DelaySetting, TimingConfig};
use crate::recording::RawFrame;

/// Adjust a single recorded delay.
pub fn adjust_delay(recorded: f64, timing: &TimingConfig) -> f64 {
    let delay = match (timing.frame_delay, timing.max_idle_time) {
        (DelaySetting::Millis(fixed), _) => fixed,
        (DelaySetting::Auto, DelaySetting::Millis(cap)) if recorded > cap => cap,
        _ => recorded,
    };
    delay * timing.speed_factor
}

/// Turn recorded frames into frames carrying their adjusted delay.
///
/// Timing fields are left at zero; [`super::Timeline::from_normalized`]
/// assigns them.
pub fn normalize(raw: Vec<RawFrame>, timing: &TimingConfig) -> Vec<Frame> {
    raw.into_iter()
        .map(|frame| {
            let adjusted_delay = adjust_delay(frame.delay, timing);
            Frame {
                content: frame.content,
                delay: frame.delay,
                adjusted_delay,
                start_time: 0.0,
                end_time: 0.0,
                duration: 0.0,
            }
        })
        .collect()
}
