//! Playback engine.
//!
//! [`Player`] owns the timeline, the optional snapshot cache and the
//! rendering surface. It is driven by calling [`Player::tick`] on a fixed
//! short interval; each tick advances playback time by the wall-clock time
//! since the previous tick and starts a render pass when a frame boundary
//! was crossed.
//!
//! At most one activity (render pass, seek, start reset) is in flight.
//! Ticks that arrive while one is pending only poll it, and their elapsed
//! time is dropped. Transport commands issued meanwhile are queued and run
//! once the player is idle; `pause` always takes effect immediately.
//!
//! # Structure
//!
//! - `builder` - Construction, first paint
//! - `hooks` - Before/after render hooks
//! - `render` - Render passes
//! - `seek` - Seek and start reset jobs
//! - `state` - State machine types
//!
//! # Usage
//!
//! ```no_run
//! use termreel::{ManualClock, Player, Recording, VtSurface};
//!
//! let recording = Recording::load("demo.json").unwrap();
//! let clock = ManualClock::new();
//! let mut player = Player::builder(recording)
//!     .build(VtSurface::new(80, 24), clock.clone())
//!     .unwrap();
//!
//! player.play().unwrap();
//! clock.advance_ms(500);
//! player.tick().unwrap();
//! println!("{}", player.surface());
//! ```

mod builder;
mod hooks;
mod render;
mod seek;
mod state;

pub use builder::PlayerBuilder;
pub use hooks::{FrameHook, HookResult, Hooks};
pub use state::PlayerState;

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::task::Poll;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::clock::{millis_between, Clock, SystemClock};
use crate::config::{PlayerOptions, ReplayStrategy};
use crate::error::Result;
use crate::events::{EventBus, Notification, PlayerEvent, PlayerId};
use crate::recording::Recording;
use crate::snapshot::SnapshotCache;
use crate::surface::RenderSurface;
use crate::timeline::Timeline;
use render::{RenderCtx, RenderPass};
use seek::{SeekJob, StartJob};
use state::{Command, Mode, Resume};

/// A terminal session player.
pub struct Player<S: RenderSurface, C: Clock = SystemClock> {
    id: PlayerId,
    options: PlayerOptions,
    timeline: Timeline,
    cache: Option<SnapshotCache>,
    surface: S,
    clock: C,
    hooks: Hooks,
    events: EventBus,
    mode: Mode,
    queue: VecDeque<Command>,
    /// Milliseconds, `0..=total_duration`.
    current_time: f64,
    last_rendered: Option<usize>,
    last_tick: Instant,
}

impl Player<crate::surface::VtSurface> {
    /// Start configuring a player for `recording`.
    pub fn builder(recording: Recording) -> PlayerBuilder {
        PlayerBuilder::new(recording)
    }
}

impl<S: RenderSurface, C: Clock> Player<S, C> {
    // Accessors

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn state(&self) -> PlayerState {
        self.mode.state()
    }

    /// Playing, or will be once the in-flight activity finishes.
    pub fn is_playing(&self) -> bool {
        self.mode.resume() == Resume::Playing
    }

    /// `play` has been called since initialization.
    pub fn is_started(&self) -> bool {
        self.mode.resume() != Resume::Ready
    }

    /// The single-flight guard: an activity owns the surface.
    pub fn is_rendering(&self) -> bool {
        self.mode.is_busy()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    pub fn frames_count(&self) -> usize {
        self.timeline.len()
    }

    pub fn last_rendered_frame(&self) -> Option<usize> {
        self.last_rendered
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn snapshot_cache(&self) -> Option<&SnapshotCache> {
        self.cache.as_ref()
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Shorthand for `events_mut().channel()`.
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        self.events.channel()
    }

    // Transport

    /// Start or resume playback.
    ///
    /// From the initial state, or when parked at the end of the timeline,
    /// playback restarts at 0 after the surface reset settles.
    pub fn play(&mut self) -> Result<()> {
        self.queue.push_back(Command::Play);
        let now = self.clock.now();
        self.pump_at(now)
    }

    /// Stop advancing time. Takes effect immediately, even during an
    /// activity, and cancels queued `play` requests.
    pub fn pause(&mut self) {
        self.queue.retain(|command| *command != Command::Play);
        match &mut self.mode {
            Mode::Rendering { playing, .. } | Mode::Starting { play: playing, .. } => {
                *playing = false
            }
            Mode::Seeking { resume, .. } => {
                if *resume == Resume::Playing {
                    *resume = Resume::Paused;
                }
            }
            Mode::Ready | Mode::Paused | Mode::Playing => {}
        }
        if matches!(self.mode, Mode::Playing) {
            self.mode = Mode::Paused;
        }
        self.emit(PlayerEvent::PlayingPaused);
    }

    /// Play if paused, pause if playing.
    pub fn toggle(&mut self) -> Result<()> {
        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Move playback to `time` (milliseconds) and rebuild the surface.
    ///
    /// The caller is responsible for keeping `time` inside the timeline.
    pub fn jump(&mut self, time: f64) -> Result<()> {
        self.jump_with(time, true)
    }

    /// Rebuild the surface at `time` without moving the playback position
    /// or notifying progress.
    pub fn jump_preview(&mut self, time: f64) -> Result<()> {
        self.jump_with(time, false)
    }

    pub fn jump_with(&mut self, time: f64, update_player: bool) -> Result<()> {
        self.queue.push_back(Command::Jump {
            time,
            update_player,
        });
        let now = self.clock.now();
        self.pump_at(now)
    }

    // Clock

    /// One clock tick.
    ///
    /// # Errors
    ///
    /// A hook failure or render timeout observed during this tick. The
    /// failed pass is abandoned; the next tick continues normally.
    pub fn tick(&mut self) -> Result<()> {
        let now = self.clock.now();
        let elapsed = millis_between(self.last_tick, now);
        self.last_tick = now;

        if self.mode.is_busy() {
            return self.pump_at(now);
        }
        if !matches!(self.mode, Mode::Playing) {
            return Ok(());
        }
        self.advance(elapsed, now)
    }

    fn advance(&mut self, elapsed: f64, now: Instant) -> Result<()> {
        let total = self.timeline.total_duration();
        if self.current_time < total {
            self.current_time = (self.current_time + elapsed).min(total);
            self.emit_progress();
        }
        self.current_time = self.current_time.min(total);

        if let Some(last) = self.last_rendered {
            if self.timeline.is_frame_at(self.current_time, last) {
                return Ok(());
            }
        }

        let last_index = self.timeline.last_index();
        if self.last_rendered == Some(last_index) && self.current_time >= total {
            debug!(player = %self.id, "Playback completed");
            self.emit(PlayerEvent::PlayingCompleted);
            if self.options.repeat {
                self.current_time = 0.0;
                self.emit_progress();
            } else {
                self.pause();
            }
            return Ok(());
        }

        let next = match self.last_rendered {
            Some(last) if self.timeline.is_frame_at(self.current_time, last + 1) => Some(last + 1),
            _ => self.timeline.find_frame_at(self.current_time, 0),
        };
        let Some(index) = next else {
            return Ok(());
        };

        let catch_up_from = match (self.options.strategy, self.last_rendered) {
            (ReplayStrategy::Sequential, Some(previous)) if index > previous => previous + 1,
            (ReplayStrategy::Sequential, None) => 0,
            _ => index,
        };
        trace!(index, catch_up_from, current_time = self.current_time, "Rendering frame");

        self.last_rendered = Some(index);
        self.mode = Mode::Rendering {
            pass: RenderPass::new(index, catch_up_from, now),
            playing: true,
        };
        self.pump_at(now)
    }

    /// Step the in-flight activity, then run queued commands while idle.
    pub(crate) fn pump_at(&mut self, now: Instant) -> Result<()> {
        loop {
            if self.mode.is_busy() {
                match self.step_activity(now)? {
                    Poll::Pending => return Ok(()),
                    Poll::Ready(()) => continue,
                }
            }
            let Some(command) = self.queue.pop_front() else {
                return Ok(());
            };
            self.run_command(command, now);
        }
    }

    fn run_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Play => self.start_playing(now),
            Command::Jump {
                time,
                update_player,
            } => {
                // Seeking never starts the session; a later `play` from
                // `Ready` still restarts at 0.
                let resume = self.mode.resume();
                if update_player {
                    self.current_time = time;
                    self.emit_progress();
                }
                debug!(player = %self.id, time, update_player, "Seeking");
                self.mode = Mode::Seeking {
                    job: SeekJob::new(&self.timeline, time, now),
                    resume,
                };
            }
        }
    }

    fn at_end(&self) -> bool {
        self.last_rendered == Some(self.timeline.last_index())
            && self.current_time >= self.timeline.total_duration()
    }

    fn start_playing(&mut self, now: Instant) {
        match self.mode {
            Mode::Ready => self.restart(now),
            Mode::Paused if self.at_end() => self.restart(now),
            Mode::Paused => {
                self.mode = Mode::Playing;
                self.last_tick = now;
                self.emit(PlayerEvent::PlayingStarted);
            }
            Mode::Playing => self.emit(PlayerEvent::PlayingStarted),
            _ => {}
        }
    }

    fn restart(&mut self, now: Instant) {
        debug!(player = %self.id, "Starting playback from the beginning");
        self.current_time = 0.0;
        self.last_rendered = None;
        self.emit_progress();
        self.mode = Mode::Starting {
            job: StartJob::begin(&mut self.surface, now),
            play: true,
        };
    }

    fn step_activity(&mut self, now: Instant) -> Result<Poll<()>> {
        let timeout = self.options.render_timeout;
        match &mut self.mode {
            Mode::Rendering { pass, playing } => {
                let playing = *playing;
                let mut ctx = RenderCtx {
                    timeline: &self.timeline,
                    cache: self.cache.as_ref(),
                    surface: &mut self.surface,
                    hooks: &mut self.hooks,
                    timeout,
                };
                let Poll::Ready(result) = pass.poll(&mut ctx, now) else {
                    return Ok(Poll::Pending);
                };
                self.mode = if playing { Mode::Playing } else { Mode::Paused };
                self.last_tick = now;
                if let Err(err) = result {
                    warn!(player = %self.id, error = %err, "Render pass failed");
                    return Err(err);
                }
            }
            Mode::Seeking { job, resume } => {
                let resume = *resume;
                let outcome = job.poll(
                    &self.timeline,
                    self.cache.as_ref(),
                    &mut self.surface,
                    timeout,
                    now,
                );
                let Poll::Ready(result) = outcome else {
                    return Ok(Poll::Pending);
                };
                self.mode = resume.into();
                self.last_tick = now;
                match result {
                    Ok(target) => self.last_rendered = target,
                    Err(err) => {
                        warn!(player = %self.id, error = %err, "Seek failed");
                        return Err(err);
                    }
                }
            }
            Mode::Starting { job, play } => {
                let play = *play;
                let Poll::Ready(result) = job.poll(&mut self.surface, timeout, now) else {
                    return Ok(Poll::Pending);
                };
                self.mode = Mode::Paused;
                self.last_tick = now;
                if let Err(err) = result {
                    warn!(player = %self.id, error = %err, "Surface reset failed");
                    return Err(err);
                }
                if play {
                    self.mode = Mode::Playing;
                    self.emit(PlayerEvent::PlayingStarted);
                }
            }
            Mode::Ready | Mode::Paused | Mode::Playing => {}
        }
        Ok(Poll::Ready(()))
    }

    pub(crate) fn emit(&mut self, event: PlayerEvent) {
        self.events.emit(Notification {
            player: self.id,
            event,
        });
    }

    pub(crate) fn emit_progress(&mut self) {
        self.emit(PlayerEvent::Progress {
            current_time: self.current_time,
            total_duration: self.timeline.total_duration(),
        });
    }
}
