//! Play command handler

use anyhow::Result;
use std::path::Path;

use termreel::{play_file, PlaybackResult};

use super::{ensure_exists, option_layers};
use crate::cli::TimingArgs;

/// Play a recording in the terminal until it ends or the user quits.
pub fn handle(file: &Path, timing: &TimingArgs) -> Result<()> {
    ensure_exists(file)?;
    let layers = option_layers(timing)?;

    let result = play_file(file, &layers)
        .unwrap_or_else(|e| PlaybackResult::Error(format!("{:#}", e)));
    if let PlaybackResult::Error(_) = result {
        anyhow::bail!(result.message());
    }
    println!("{}", result.message());
    Ok(())
}
