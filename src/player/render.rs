//! Render passes.
//!
//! A pass takes one frame to the surface in strict order:
//!
//! 1. before hook
//! 2. render: apply the cached snapshot, or write frame content
//! 3. settle: wait for the surface (sequential writes only)
//! 4. after hook
//!
//! The pass is polled from the player's tick and never blocks. A failing
//! hook or an expired step timeout ends the pass with an error.

use std::task::Poll;
use std::time::{Duration, Instant};

use tracing::trace;

use super::hooks::{poll_hook, Hooks};
use crate::error::{HookStage, PlayerError, Result};
use crate::snapshot::SnapshotCache;
use crate::surface::{ExecMode, RenderSurface};
use crate::timeline::Timeline;

/// Borrowed player state a pass needs.
pub(crate) struct RenderCtx<'a, S> {
    pub timeline: &'a Timeline,
    pub cache: Option<&'a SnapshotCache>,
    pub surface: &'a mut S,
    pub hooks: &'a mut Hooks,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Before,
    Render,
    Settle,
    After,
    Done,
}

#[derive(Debug)]
pub(crate) struct RenderPass {
    index: usize,
    /// First frame written in sequential mode; frames skipped since the
    /// last render are written too.
    catch_up_from: usize,
    step: Step,
    hook_started: bool,
    step_since: Instant,
}

impl RenderPass {
    pub fn new(index: usize, catch_up_from: usize, now: Instant) -> Self {
        Self {
            index,
            catch_up_from: catch_up_from.min(index),
            step: Step::Before,
            hook_started: false,
            step_since: now,
        }
    }

    fn enter(&mut self, step: Step, now: Instant) {
        self.step = step;
        self.hook_started = false;
        self.step_since = now;
    }

    fn pending(
        &self,
        stage: HookStage,
        timeout: Option<Duration>,
        now: Instant,
    ) -> Poll<Result<()>> {
        match timeout {
            Some(timeout) if now.saturating_duration_since(self.step_since) > timeout => {
                Poll::Ready(Err(PlayerError::RenderTimeout {
                    stage,
                    index: self.index,
                    timeout,
                }))
            }
            _ => Poll::Pending,
        }
    }

    fn hook_failed(&self, stage: HookStage, message: String) -> Poll<Result<()>> {
        Poll::Ready(Err(PlayerError::Hook {
            stage,
            index: self.index,
            message,
        }))
    }

    /// Run as many steps as can complete now.
    pub fn poll<S: RenderSurface>(
        &mut self,
        ctx: &mut RenderCtx<'_, S>,
        now: Instant,
    ) -> Poll<Result<()>> {
        let timeline = ctx.timeline;
        let Some(frame) = timeline.frame(self.index) else {
            return Poll::Ready(Err(PlayerError::InvalidRecording(format!(
                "frame {} is out of range",
                self.index
            ))));
        };

        loop {
            match self.step {
                Step::Before => {
                    match poll_hook(
                        ctx.hooks.before.as_deref_mut(),
                        &mut self.hook_started,
                        frame,
                        self.index,
                    ) {
                        Poll::Pending => return self.pending(HookStage::Before, ctx.timeout, now),
                        Poll::Ready(Err(message)) => {
                            return self.hook_failed(HookStage::Before, message)
                        }
                        Poll::Ready(Ok(())) => self.enter(Step::Render, now),
                    }
                }
                Step::Render => match ctx.cache.and_then(|cache| cache.get(self.index)) {
                    Some(snapshot) => {
                        ctx.surface.apply_snapshot(&snapshot.buffer);
                        self.enter(Step::After, now);
                    }
                    None => {
                        let content = timeline.content_range(self.catch_up_from, self.index);
                        ctx.surface.write(&content, ExecMode::Deferred);
                        self.enter(Step::Settle, now);
                    }
                },
                Step::Settle => {
                    if !ctx.surface.poll_settled() {
                        return self.pending(HookStage::Render, ctx.timeout, now);
                    }
                    self.enter(Step::After, now);
                }
                Step::After => {
                    match poll_hook(
                        ctx.hooks.after.as_deref_mut(),
                        &mut self.hook_started,
                        frame,
                        self.index,
                    ) {
                        Poll::Pending => return self.pending(HookStage::After, ctx.timeout, now),
                        Poll::Ready(Err(message)) => {
                            return self.hook_failed(HookStage::After, message)
                        }
                        Poll::Ready(Ok(())) => self.enter(Step::Done, now),
                    }
                }
                Step::Done => {
                    trace!(index = self.index, "Render pass complete");
                    return Poll::Ready(Ok(()));
                }
            }
        }
    }
}
