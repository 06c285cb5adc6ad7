//! Precomputed snapshot cache.
//!
//! Replays the whole timeline once through a surface in
//! [`ExecMode::Immediate`] and keeps the buffer state after every frame.
//! Seeking then applies one snapshot instead of replaying a prefix.

use std::thread;

use tracing::{debug, trace};

use crate::surface::{BufferSnapshot, ExecMode, RenderSurface};
use crate::timeline::Timeline;

/// Buffer state after a frame, on the same time axis as the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub buffer: BufferSnapshot,
    pub start_time: f64,
    pub end_time: f64,
    pub delay: f64,
}

/// One snapshot per timeline frame, index for index.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    snapshots: Vec<Snapshot>,
}

impl SnapshotCache {
    /// Replay `timeline` through `surface` and capture every frame.
    ///
    /// The surface is reset before and after the pass. Every `batch`
    /// frames the thread yields to the scheduler; `0` never yields.
    pub fn build<S: RenderSurface + ?Sized>(
        timeline: &Timeline,
        surface: &mut S,
        batch: usize,
    ) -> Self {
        surface.reset(ExecMode::Immediate);

        let mut snapshots = Vec::with_capacity(timeline.len());
        for (index, frame) in timeline.frames().iter().enumerate() {
            surface.write(&frame.content, ExecMode::Immediate);
            snapshots.push(Snapshot {
                buffer: surface.snapshot(),
                start_time: frame.start_time,
                end_time: frame.end_time,
                delay: frame.adjusted_delay,
            });

            if batch > 0 && (index + 1) % batch == 0 {
                trace!(cached = index + 1, total = timeline.len(), "Snapshot batch done");
                thread::yield_now();
            }
        }

        surface.reset(ExecMode::Immediate);
        debug!(snapshots = snapshots.len(), "Built snapshot cache");

        Self { snapshots }
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}
