//! Frame lookup by time.

use super::Timeline;

impl Timeline {
    /// Index of the frame at or after `from` whose interval contains `time`.
    ///
    /// Intervals are half-open, except that `time == total_duration`
    /// resolves to the final frame. Returns `None` for times outside the
    /// timeline or when every frame from `from` on ends before `time`.
    pub fn find_frame_at(&self, time: f64, from: usize) -> Option<usize> {
        let tail = self.frames.get(from..)?;
        let offset = tail.partition_point(|f| f.end_time <= time);
        if let Some(frame) = tail.get(offset) {
            if frame.start_time <= time {
                return Some(from + offset);
            }
        }

        // Close the timeline at its terminal boundary.
        let last = self.frames.last()?;
        let last_index = self.frames.len() - 1;
        (last_index >= from && last.start_time <= time && time == last.end_time)
            .then_some(last_index)
    }

    /// True if `index` is valid and `time` lies in `[start_time, end_time)`.
    pub fn is_frame_at(&self, time: f64, index: usize) -> bool {
        self.frames
            .get(index)
            .is_some_and(|f| f.start_time <= time && time < f.end_time)
    }
}
