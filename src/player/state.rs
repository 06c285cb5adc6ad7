//! Player state machine types.
//!
//! The transport state is one tagged [`Mode`]. Activities that touch the
//! surface (a render pass, a seek, the start reset) carry the state to
//! return to, so "playing while seeking" or "rendering while stopped"
//! cannot be expressed.

use super::render::RenderPass;
use super::seek::{SeekJob, StartJob};

/// Externally visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Initialized, never played.
    Ready,
    Paused,
    Playing,
    /// A frame is on its way to the surface.
    Rendering,
    /// The surface is being rebuilt for a jump.
    Seeking,
    /// The surface is being reset before playing from the start.
    Starting,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Ready => "ready",
            PlayerState::Paused => "paused",
            PlayerState::Playing => "playing",
            PlayerState::Rendering => "rendering",
            PlayerState::Seeking => "seeking",
            PlayerState::Starting => "starting",
        }
    }
}

/// Idle state to restore after a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resume {
    Ready,
    Paused,
    Playing,
}

#[derive(Debug)]
pub(crate) enum Mode {
    Ready,
    Paused,
    Playing,
    Rendering { pass: RenderPass, playing: bool },
    Seeking { job: SeekJob, resume: Resume },
    Starting { job: StartJob, play: bool },
}

impl Mode {
    /// An activity owns the surface; ticks must not advance time.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Mode::Rendering { .. } | Mode::Seeking { .. } | Mode::Starting { .. }
        )
    }

    pub fn state(&self) -> PlayerState {
        match self {
            Mode::Ready => PlayerState::Ready,
            Mode::Paused => PlayerState::Paused,
            Mode::Playing => PlayerState::Playing,
            Mode::Rendering { .. } => PlayerState::Rendering,
            Mode::Seeking { .. } => PlayerState::Seeking,
            Mode::Starting { .. } => PlayerState::Starting,
        }
    }

    /// The idle state this mode is in or will return to.
    pub fn resume(&self) -> Resume {
        match self {
            Mode::Ready => Resume::Ready,
            Mode::Paused => Resume::Paused,
            Mode::Playing => Resume::Playing,
            Mode::Rendering { playing, .. } | Mode::Starting { play: playing, .. } => {
                if *playing {
                    Resume::Playing
                } else {
                    Resume::Paused
                }
            }
            Mode::Seeking { resume, .. } => *resume,
        }
    }
}

impl From<Resume> for Mode {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Ready => Mode::Ready,
            Resume::Paused => Mode::Paused,
            Resume::Playing => Mode::Playing,
        }
    }
}

/// Transport requests issued while an activity was in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    Play,
    Jump { time: f64, update_player: bool },
}
