//! Info command handler

use anyhow::{Context, Result};
use std::path::Path;

use termreel::{format_time, PlayerOptions, Recording, Timeline};

use super::{ensure_exists, option_layers, truncate_string};
use crate::cli::TimingArgs;

const PREVIEW_WIDTH: usize = 40;

/// Print a recording summary and, optionally, its normalized frame list.
pub fn handle(file: &Path, show_frames: bool, timing: &TimingArgs) -> Result<()> {
    ensure_exists(file)?;
    let recording = Recording::load(file)?;

    let layers = option_layers(timing)?;
    let layers: Vec<_> = layers.iter().collect();
    let options = PlayerOptions::resolve(&recording.config, &layers)?;
    let recorded = recording.recorded_duration();
    let has_thumbnail = recording.thumbnail.is_some();
    let timeline = Timeline::build(recording.frames, &options.timing)
        .with_context(|| format!("Failed to build timeline for {}", file.display()))?;

    print!(
        "{}",
        summary(file, &timeline, recorded, &options, has_thumbnail)
    );
    if show_frames {
        print!("{}", frame_table(&timeline));
    }
    Ok(())
}

fn summary(
    file: &Path,
    timeline: &Timeline,
    recorded: f64,
    options: &PlayerOptions,
    has_thumbnail: bool,
) -> String {
    let total = timeline.total_duration();
    let mut out = String::new();
    out.push_str(&format!("File:      {}\n", file.display()));
    out.push_str(&format!("Frames:    {}\n", timeline.len()));
    out.push_str(&format!("Duration:  {} ({:.0} ms)\n", format_time(total), total));
    out.push_str(&format!(
        "Recorded:  {} ({:.0} ms)\n",
        format_time(recorded),
        recorded
    ));
    out.push_str(&format!("Size:      {}x{}\n", options.cols, options.rows));
    out.push_str(&format!("Strategy:  {}\n", options.strategy));
    out.push_str(&format!(
        "Thumbnail: {}\n",
        if has_thumbnail { "embedded" } else { "replayed" }
    ));
    out
}

fn frame_table(timeline: &Timeline) -> String {
    let mut out = String::from("\n    #     start  duration  content\n");
    for (index, frame) in timeline.frames().iter().enumerate() {
        let preview: String = frame.content.escape_debug().collect();
        out.push_str(&format!(
            "{:>5} {:>9.0} {:>9.0}  {}\n",
            index,
            frame.start_time,
            frame.duration,
            truncate_string(&preview, PREVIEW_WIDTH)
        ));
    }
    out
}
