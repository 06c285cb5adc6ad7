//! Before/after render hooks.
//!
//! A hook runs around every frame of a render pass. It may finish right
//! away or report `Poll::Pending` and be polled again on later ticks; the
//! pass does not move on until it completes.

use std::fmt;
use std::task::Poll;

use crate::timeline::Frame;

/// `Err` carries a message surfaced as [`crate::PlayerError::Hook`].
pub type HookResult = Result<(), String>;

/// Work attached to a render pass.
pub trait FrameHook {
    /// Called once when the pass reaches this hook.
    fn start(&mut self, frame: &Frame, index: usize) -> Poll<HookResult>;

    /// Called on later ticks while `start` (or a previous `poll`) was pending.
    fn poll(&mut self, _frame: &Frame, _index: usize) -> Poll<HookResult> {
        Poll::Ready(Ok(()))
    }
}

/// Plain closures complete synchronously.
impl<F> FrameHook for F
where
    F: FnMut(&Frame, usize) -> HookResult,
{
    fn start(&mut self, frame: &Frame, index: usize) -> Poll<HookResult> {
        Poll::Ready(self(frame, index))
    }
}

/// The hook pair of a player.
#[derive(Default)]
pub struct Hooks {
    pub before: Option<Box<dyn FrameHook>>,
    pub after: Option<Box<dyn FrameHook>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Drive an optional hook one step. A missing hook completes immediately.
pub(crate) fn poll_hook(
    hook: Option<&mut (dyn FrameHook + 'static)>,
    started: &mut bool,
    frame: &Frame,
    index: usize,
) -> Poll<HookResult> {
    let Some(hook) = hook else {
        return Poll::Ready(Ok(()));
    };
    if *started {
        hook.poll(frame, index)
    } else {
        *started = true;
        hook.start(frame, index)
    }
}
