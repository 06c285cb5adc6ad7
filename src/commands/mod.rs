//! Command handlers for the termreel CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod config;
pub mod info;
pub mod play;

use anyhow::Result;
use std::path::Path;

use termreel::{Config, PlaybackConfig};

use crate::cli::TimingArgs;

/// Truncate a string to a maximum length, adding ellipsis if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Fail early with a readable message when the recording does not exist.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(())
}

/// Option layers above the recording config: user file, then flags.
pub fn option_layers(timing: &TimingArgs) -> Result<Vec<PlaybackConfig>> {
    let config = Config::load()?;
    Ok(vec![config.playback, timing.to_layer()])
}
