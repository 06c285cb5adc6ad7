//! Interactive terminal player.
//!
//! Drives a [`Player`] over a [`VtSurface`] sized to the recording and
//! paints the surface into the real terminal with crossterm.
//!
//! Controls:
//! - Space: play/pause
//! - Left/Right: seek back/forward 5s
//! - Home: restart from the beginning
//! - q/Esc/Ctrl-C: quit
//!
//! # Structure
//!
//! - `viewport` - Surface rendering
//! - `status` - Progress and status bars

mod status;
mod viewport;

pub use status::{render_progress_bar, render_separator_line, render_status_bar};
pub use viewport::render_viewport;

use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

use crate::clock::SystemClock;
use crate::config::{PlaybackConfig, PlayerOptions};
use crate::error::PlayerError;
use crate::events::{Notification, PlayerEvent};
use crate::player::Player;
use crate::recording::Recording;
use crate::surface::VtSurface;

/// Seek step for the arrow keys, in milliseconds.
const SEEK_STEP_MS: f64 = 5000.0;
/// Minimum time between two repaints.
const FRAME_BUDGET: Duration = Duration::from_millis(16);
/// Rows used below the viewport (separator, progress, status).
const STATUS_LINES: usize = 3;

/// Result of a playback operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Playback completed successfully
    Success(String),
    /// Playback was interrupted (e.g., user pressed q)
    Interrupted,
    /// Playback failed with an error
    Error(String),
}

impl PlaybackResult {
    /// Get a human-readable message for this result
    pub fn message(&self) -> String {
        match self {
            PlaybackResult::Success(name) => format!("Played: {}", name),
            PlaybackResult::Interrupted => "Playback interrupted".to_string(),
            PlaybackResult::Error(e) => format!("Failed to play: {}", e),
        }
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum KeyAction {
    Toggle,
    Seek(f64),
    Restart,
    Quit,
    None,
}

pub(crate) fn key_action(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(' ') => KeyAction::Toggle,
        KeyCode::Left => KeyAction::Seek(-SEEK_STEP_MS),
        KeyCode::Right => KeyAction::Seek(SEEK_STEP_MS),
        KeyCode::Home => KeyAction::Restart,
        _ => KeyAction::None,
    }
}

/// Load `path` and play it interactively until it completes or the user
/// quits. `layers` are stacked over the recording's own config.
pub fn play_file(path: &Path, layers: &[PlaybackConfig]) -> Result<PlaybackResult> {
    let recording = Recording::load(path)?;
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let layers: Vec<&PlaybackConfig> = layers.iter().collect();
    let options = PlayerOptions::resolve(&recording.config, &layers)?;
    let surface = VtSurface::new(options.cols, options.rows);
    let mut player = Player::builder(recording)
        .options(options)
        .build(surface, SystemClock)
        .context("Failed to initialize player")?;
    let notifications = player.subscribe();
    // The interactive player always starts playing.
    if !player.is_playing() {
        player.play()?;
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run_loop(&mut stdout, &mut player, &notifications, name);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

/// Hook failures and render timeouts only cost the current pass; log them
/// and keep the session alive. Anything else ends playback.
fn tolerate(result: std::result::Result<(), PlayerError>, what: &str) -> Result<()> {
    match result {
        Err(err) if err.is_transient() => {
            warn!(error = %err, "{}", what);
            Ok(())
        }
        other => other.map_err(anyhow::Error::from),
    }
}

fn run_loop(
    stdout: &mut io::Stdout,
    player: &mut Player<VtSurface>,
    notifications: &Receiver<Notification>,
    name: String,
) -> Result<PlaybackResult> {
    let tick_interval = player.options().tick_interval;
    let repeat = player.options().repeat;
    let (mut term_cols, mut term_rows) = terminal::size()?;
    let mut last_paint: Option<Instant> = None;
    let mut painted_revision = u64::MAX;
    let mut painted_time = f64::NAN;
    let mut dirty = true;

    loop {
        if event::poll(tick_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key_action(&key) {
                    KeyAction::Quit => return Ok(PlaybackResult::Interrupted),
                    KeyAction::Toggle => tolerate(player.toggle(), "Toggle failed")?,
                    KeyAction::Seek(delta) => {
                        let target =
                            (player.current_time() + delta).clamp(0.0, player.total_duration());
                        tolerate(player.jump(target), "Seek failed")?;
                    }
                    KeyAction::Restart => tolerate(player.jump(0.0), "Restart failed")?,
                    KeyAction::None => {}
                },
                Event::Resize(cols, rows) => {
                    term_cols = cols;
                    term_rows = rows;
                    dirty = true;
                }
                _ => {}
            }
        }

        tolerate(player.tick(), "Tick failed")?;

        let mut completed = false;
        for notification in notifications.try_iter() {
            if notification.event == PlayerEvent::PlayingCompleted && !repeat {
                completed = true;
            }
        }

        let changed = dirty
            || player.surface().revision() != painted_revision
            || player.current_time() != painted_time
            || completed;
        let due = last_paint.map_or(true, |at| at.elapsed() >= FRAME_BUDGET);
        if changed && (due || completed) {
            draw(stdout, player, term_cols as usize, term_rows as usize)?;
            last_paint = Some(Instant::now());
            painted_revision = player.surface().revision();
            painted_time = player.current_time();
            dirty = false;
        }

        if completed {
            std::thread::sleep(Duration::from_millis(500));
            return Ok(PlaybackResult::Success(name));
        }
    }
}

fn draw(
    stdout: &mut io::Stdout,
    player: &Player<VtSurface>,
    term_cols: usize,
    term_rows: usize,
) -> Result<()> {
    let view_rows = term_rows.saturating_sub(STATUS_LINES);
    let mut out = String::with_capacity(term_cols * term_rows * 2);

    render_viewport(&mut out, player.surface(), view_rows, term_cols);
    render_separator_line(&mut out, term_cols, view_rows);
    render_progress_bar(
        &mut out,
        term_cols,
        view_rows + 1,
        player.current_time(),
        player.total_duration(),
    );
    render_status_bar(&mut out, term_cols, view_rows + 2, player.state());

    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
