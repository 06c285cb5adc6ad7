//! Player construction.

use std::collections::VecDeque;

use tracing::debug;

use super::hooks::{FrameHook, HookResult, Hooks};
use super::state::{Command, Mode};
use super::Player;
use crate::clock::Clock;
use crate::config::{PlaybackConfig, PlayerOptions, ReplayStrategy};
use crate::error::{PlayerError, Result};
use crate::events::{EventBus, Notification, PlayerEvent, PlayerId};
use crate::recording::Recording;
use crate::snapshot::SnapshotCache;
use crate::surface::RenderSurface;
use crate::timeline::{Frame, Timeline};

/// Configures and builds a [`Player`].
///
/// Options come from the recording's config with any added layers stacked
/// on top, unless explicit [`PlayerOptions`] are given.
pub struct PlayerBuilder {
    recording: Recording,
    layers: Vec<PlaybackConfig>,
    options: Option<PlayerOptions>,
    hooks: Hooks,
    events: EventBus,
}

impl PlayerBuilder {
    pub(crate) fn new(recording: Recording) -> Self {
        Self {
            recording,
            layers: Vec::new(),
            options: None,
            hooks: Hooks::default(),
            events: EventBus::new(),
        }
    }

    /// Stack an option layer over the recording config. Later layers win.
    pub fn layer(mut self, layer: PlaybackConfig) -> Self {
        self.layers.push(layer);
        self
    }

    /// Use these options as-is, ignoring the recording config and layers.
    pub fn options(mut self, options: PlayerOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn before_hook(mut self, hook: impl FrameHook + 'static) -> Self {
        self.hooks.before = Some(Box::new(hook));
        self
    }

    pub fn after_hook(mut self, hook: impl FrameHook + 'static) -> Self {
        self.hooks.after = Some(Box::new(hook));
        self
    }

    /// Synchronous before hook.
    pub fn before_render<F>(self, hook: F) -> Self
    where
        F: FnMut(&Frame, usize) -> HookResult + 'static,
    {
        self.before_hook(hook)
    }

    /// Synchronous after hook.
    pub fn after_render<F>(self, hook: F) -> Self
    where
        F: FnMut(&Frame, usize) -> HookResult + 'static,
    {
        self.after_hook(hook)
    }

    /// Register a listener before construction so it sees `Init`.
    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&Notification) + 'static,
    {
        self.events.subscribe(listener);
        self
    }

    /// Build the timeline (and snapshot cache), then show the first paint.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for unusable options, `InvalidRecording` for an
    /// empty frame list or a thumbnail of the wrong size.
    pub fn build<S, C>(self, mut surface: S, clock: C) -> Result<Player<S, C>>
    where
        S: RenderSurface,
        C: Clock,
    {
        let options = match self.options {
            Some(options) => {
                options.validate()?;
                options
            }
            None => {
                let layers: Vec<&PlaybackConfig> = self.layers.iter().collect();
                PlayerOptions::resolve(&self.recording.config, &layers)?
            }
        };

        let timeline = Timeline::build(self.recording.frames, &options.timing)?;

        if let Some(thumbnail) = &self.recording.thumbnail {
            if (thumbnail.cols, thumbnail.rows) != (options.cols, options.rows) {
                return Err(PlayerError::InvalidRecording(format!(
                    "thumbnail is {}x{} but the recording is {}x{}",
                    thumbnail.cols, thumbnail.rows, options.cols, options.rows
                )));
            }
        }

        let cache = match options.strategy {
            ReplayStrategy::Snapshot => Some(SnapshotCache::build(
                &timeline,
                &mut surface,
                options.snapshot_batch,
            )),
            ReplayStrategy::Sequential => None,
        };

        let now = clock.now();
        let mut player = Player {
            id: PlayerId::next(),
            options,
            timeline,
            cache,
            surface,
            clock,
            hooks: self.hooks,
            events: self.events,
            mode: Mode::Ready,
            queue: VecDeque::new(),
            current_time: 0.0,
            last_rendered: None,
            last_tick: now,
        };

        debug!(
            player = %player.id,
            frames = player.timeline.len(),
            total_duration = player.timeline.total_duration(),
            strategy = %player.options.strategy,
            "Player initialized"
        );
        player.emit(PlayerEvent::Init);

        match self.recording.thumbnail {
            Some(thumbnail) => player.surface.apply_snapshot(&thumbnail),
            None => {
                let time = player
                    .options
                    .thumbnail_time
                    .clamp(0.0, player.timeline.total_duration());
                player.queue.push_back(Command::Jump {
                    time,
                    update_player: false,
                });
            }
        }

        player.emit_progress();

        if player.options.autoplay {
            player.queue.push_back(Command::Play);
        }

        player.pump_at(now)?;
        Ok(player)
    }
}
