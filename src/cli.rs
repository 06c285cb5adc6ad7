//! CLI definitions for termreel
//!
//! The clap structure lives apart from main.rs so the parsing can be unit
//! tested without running any command.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use termreel::{DelaySetting, PlaybackConfig, ReplayStrategy};

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values (light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "termreel")]
#[command(about = "Replay recorded terminal sessions")]
#[command(
    long_about = "termreel - replay recorded terminal sessions in your terminal.

A recording is a JSON file with a list of frames, each holding a chunk of raw
terminal output and the delay recorded before it. termreel rebuilds the
screen frame by frame with its own terminal emulator, and can seek to any
point in time.

QUICK START:
    termreel play demo.json                 Play a recording
    termreel play demo.json --speed 0.5     Play at double speed
    termreel info demo.json --frames        Show the frame timeline
    termreel config show                    Show the effective config

Set TERMREEL_LOG=debug to see what the player is doing."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a recording interactively
    #[command(long_about = "Play a recording in the alternate screen.

CONTROLS:
    space        Play / pause
    left/right   Seek 5 seconds back / forward
    home         Restart from the beginning
    q, esc       Quit

EXAMPLES:
    termreel play demo.json
    termreel play demo.json --max-idle-time 1000 --repeat
    termreel play demo.json --strategy sequential")]
    Play {
        /// Path to the recording
        file: PathBuf,
        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Show information about a recording
    Info {
        /// Path to the recording
        file: PathBuf,
        /// List every frame with its normalized timing
        #[arg(long)]
        frames: bool,
        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration as TOML
    Show,
    /// Print the path of the configuration file
    Path,
}

/// Playback overrides shared by the commands that build a timeline.
#[derive(Args, Debug, Default, Clone)]
pub struct TimingArgs {
    /// Multiply every delay by this factor (0.5 plays twice as fast)
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f64>,
    /// Fixed delay between frames in ms, or "auto" to use recorded delays
    #[arg(long, value_name = "MS|auto")]
    pub frame_delay: Option<DelaySetting>,
    /// Cap recorded delays at this many ms, or "auto" for no cap
    #[arg(long, value_name = "MS|auto")]
    pub max_idle_time: Option<DelaySetting>,
    /// Start over when the end is reached
    #[arg(long)]
    pub repeat: bool,
    /// How frames reach the screen
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<ReplayStrategy>,
    /// Time in ms shown before playback starts
    #[arg(long, value_name = "MS")]
    pub thumbnail_time: Option<f64>,
    /// Abandon a render step pending for longer than this many ms
    #[arg(long, value_name = "MS")]
    pub render_timeout: Option<u64>,
}

impl TimingArgs {
    /// The option layer these flags describe. Unset flags stay unset.
    pub fn to_layer(&self) -> PlaybackConfig {
        PlaybackConfig {
            frame_delay: self.frame_delay,
            max_idle_time: self.max_idle_time,
            speed_factor: self.speed,
            repeat: self.repeat.then_some(true),
            thumbnail_time: self.thumbnail_time,
            strategy: self.strategy,
            render_timeout_ms: self.render_timeout,
            ..PlaybackConfig::default()
        }
    }
}
