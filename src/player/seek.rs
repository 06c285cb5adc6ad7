//! Surface rebuild jobs: seeking and the playback start reset.
//!
//! A seek resets the surface, waits for it to settle, then restores the
//! state of the frame containing the target time: by applying its cached
//! snapshot, or by replaying every frame up to it.

use std::task::Poll;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{HookStage, PlayerError, Result};
use crate::snapshot::SnapshotCache;
use crate::surface::{ExecMode, RenderSurface};
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeekStep {
    Reset,
    AwaitReset,
    Replay,
    AwaitReplay,
    Done,
}

#[derive(Debug)]
pub(crate) struct SeekJob {
    time: f64,
    /// Frame containing `time`; `None` leaves the surface blank.
    target: Option<usize>,
    step: SeekStep,
    step_since: Instant,
}

fn timed_out(since: Instant, timeout: Option<Duration>, now: Instant) -> Option<Duration> {
    timeout.filter(|&t| now.saturating_duration_since(since) > t)
}

impl SeekJob {
    pub fn new(timeline: &Timeline, time: f64, now: Instant) -> Self {
        Self {
            time,
            target: timeline.find_frame_at(time, 0),
            step: SeekStep::Reset,
            step_since: now,
        }
    }

    fn enter(&mut self, step: SeekStep, now: Instant) {
        self.step = step;
        self.step_since = now;
    }

    fn pending(&self, timeout: Option<Duration>, now: Instant) -> Poll<Result<Option<usize>>> {
        match timed_out(self.step_since, timeout, now) {
            Some(timeout) => Poll::Ready(Err(PlayerError::RenderTimeout {
                stage: HookStage::Render,
                index: self.target.unwrap_or(0),
                timeout,
            })),
            None => Poll::Pending,
        }
    }

    /// Advance the seek. Completes with the frame now on the surface.
    pub fn poll<S: RenderSurface>(
        &mut self,
        timeline: &Timeline,
        cache: Option<&SnapshotCache>,
        surface: &mut S,
        timeout: Option<Duration>,
        now: Instant,
    ) -> Poll<Result<Option<usize>>> {
        loop {
            match self.step {
                SeekStep::Reset => {
                    surface.reset(ExecMode::Deferred);
                    self.enter(SeekStep::AwaitReset, now);
                }
                SeekStep::AwaitReset => {
                    if !surface.poll_settled() {
                        return self.pending(timeout, now);
                    }
                    self.enter(SeekStep::Replay, now);
                }
                SeekStep::Replay => {
                    let Some(target) = self.target else {
                        self.enter(SeekStep::Done, now);
                        continue;
                    };
                    match cache.and_then(|cache| cache.get(target)) {
                        Some(snapshot) => {
                            surface.apply_snapshot(&snapshot.buffer);
                            self.enter(SeekStep::Done, now);
                        }
                        None => {
                            surface.write(&timeline.content_range(0, target), ExecMode::Deferred);
                            self.enter(SeekStep::AwaitReplay, now);
                        }
                    }
                }
                SeekStep::AwaitReplay => {
                    if !surface.poll_settled() {
                        return self.pending(timeout, now);
                    }
                    self.enter(SeekStep::Done, now);
                }
                SeekStep::Done => {
                    debug!(time = self.time, target = ?self.target, "Seek complete");
                    return Poll::Ready(Ok(self.target));
                }
            }
        }
    }
}

/// Reset before playing from the beginning.
#[derive(Debug)]
pub(crate) struct StartJob {
    since: Instant,
}

impl StartJob {
    /// Issues the deferred reset.
    pub fn begin<S: RenderSurface>(surface: &mut S, now: Instant) -> Self {
        surface.reset(ExecMode::Deferred);
        Self { since: now }
    }

    pub fn poll<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        timeout: Option<Duration>,
        now: Instant,
    ) -> Poll<Result<()>> {
        if surface.poll_settled() {
            return Poll::Ready(Ok(()));
        }
        match timed_out(self.since, timeout, now) {
            Some(timeout) => Poll::Ready(Err(PlayerError::RenderTimeout {
                stage: HookStage::Render,
                index: 0,
                timeout,
            })),
            None => Poll::Pending,
        }
    }
}
