//! Progress and status bars for the interactive player.

use std::fmt::Write as _;

use crate::events::{format_time, progress_percent};
use crate::player::PlayerState;

const DIM: &str = "\x1b[90m";
const GREEN: &str = "\x1b[32m";
const WHITE: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

/// Render a separator line.
pub fn render_separator_line(out: &mut String, width: usize, row: usize) {
    let _ = write!(out, "\x1b[{};1H{}{}{}", row + 1, DIM, "─".repeat(width), RESET);
}

/// Render the progress bar with the `MM:SS/MM:SS` timer on the right.
pub fn render_progress_bar(
    out: &mut String,
    width: usize,
    row: usize,
    current_time: f64,
    total_duration: f64,
) {
    let timer = format!(" {}/{}", format_time(current_time), format_time(total_duration));
    let bar_width = width.saturating_sub(timer.chars().count() + 1);
    let filled = ((bar_width as f64) * progress_percent(current_time, total_duration) / 100.0)
        as usize;

    let _ = write!(out, "\x1b[{};1H ", row + 1);
    out.push_str(GREEN);
    out.push_str(&"━".repeat(filled.min(bar_width)));
    out.push_str(DIM);
    out.push_str(&"─".repeat(bar_width - filled.min(bar_width)));
    out.push_str(WHITE);
    out.push_str(&timer);
    out.push_str(RESET);
}

/// Render the state label and key hints.
pub fn render_status_bar(out: &mut String, width: usize, row: usize, state: PlayerState) {
    let label = match state {
        PlayerState::Playing | PlayerState::Rendering => "▶ playing",
        PlayerState::Paused => "⏸ paused",
        PlayerState::Ready => "■ ready",
        PlayerState::Seeking => "… seeking",
        PlayerState::Starting => "… starting",
    };
    let hints = "space play/pause  ←/→ seek 5s  home restart  q quit";
    let mut line = format!(" {}  {}", label, hints);
    if line.chars().count() > width {
        line = line.chars().take(width).collect();
    }
    let _ = write!(out, "\x1b[{};1H\x1b[2K{}{}{}", row + 1, WHITE, line, RESET);
}
