//! Notifications pushed to the presentation layer.
//!
//! Lifecycle events carry nothing but the id of the player that raised them.
//! Progress updates carry the `(current_time, total_duration)` pair needed
//! to draw a timer and a progress bar.
//!
//! Consumers either register a listener closure or take a channel receiver;
//! both see every notification in emission order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Identifies one player instance in emitted notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u64);

impl PlayerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// The timeline (and snapshot cache) is built.
    Init,
    PlayingStarted,
    PlayingPaused,
    /// The final frame was shown for its full duration.
    PlayingCompleted,
    /// Playback position moved. Times are in milliseconds.
    Progress {
        current_time: f64,
        total_duration: f64,
    },
}

impl PlayerEvent {
    /// Event name as used by the web player this engine mirrors.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::Init => "init",
            PlayerEvent::PlayingStarted => "playingStarted",
            PlayerEvent::PlayingPaused => "playingPaused",
            PlayerEvent::PlayingCompleted => "playingCompleted",
            PlayerEvent::Progress { .. } => "progress",
        }
    }

    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, PlayerEvent::Progress { .. })
    }
}

/// An event stamped with its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notification {
    pub player: PlayerId,
    pub event: PlayerEvent,
}

type Listener = Box<dyn FnMut(&Notification)>;

/// Typed listener registry.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    channels: Vec<Sender<Notification>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure called synchronously for every notification.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Open a channel that receives every notification from now on.
    ///
    /// Dropping the receiver unsubscribes it on the next emit.
    pub fn channel(&mut self) -> Receiver<Notification> {
        let (tx, rx) = channel();
        self.channels.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, notification: Notification) {
        for listener in &mut self.listeners {
            listener(&notification);
        }
        self.channels.retain(|tx| tx.send(notification).is_ok());
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}

/// Format a time in milliseconds as `MM:SS`.
///
/// Seconds are truncated, minutes are zero padded to at least two digits.
pub fn format_time(ms: f64) -> String {
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    let minutes = (ms / 60_000.0).floor() as u64;
    let seconds = ((ms - minutes as f64 * 60_000.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Playback progress in percent.
///
/// An empty timeline counts as fully played.
pub fn progress_percent(current_time: f64, total_duration: f64) -> f64 {
    if total_duration <= 0.0 {
        return 100.0;
    }
    (current_time / total_duration * 100.0).clamp(0.0, 100.0)
}
