//! termreel - terminal session replay engine
//!
//! Plays back recorded terminal sessions (timed chunks of raw terminal
//! output) onto a terminal emulator surface, with pause/resume, seeking
//! to any point in time, and an optional snapshot cache that makes
//! seeking cost one buffer restore instead of a replay from the start.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod frontend;
pub mod player;
pub mod recording;
pub mod snapshot;
pub mod surface;
pub mod timeline;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, DelaySetting, PlaybackConfig, PlayerOptions, ReplayStrategy};
pub use error::{HookStage, PlayerError};
pub use events::{format_time, EventBus, Notification, PlayerEvent, PlayerId};
pub use frontend::{play_file, PlaybackResult};
pub use player::{FrameHook, HookResult, Player, PlayerBuilder, PlayerState};
pub use recording::{RawFrame, Recording, RecordingConfig};
pub use snapshot::{Snapshot, SnapshotCache};
pub use surface::{BufferSnapshot, ExecMode, RenderSurface, VtSurface};
pub use timeline::{Frame, Timeline};
