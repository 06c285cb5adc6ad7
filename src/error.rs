//! Error taxonomy for loading recordings and driving playback.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which hook of a render pass an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Runs before the frame reaches the surface.
    Before,
    /// The surface write (or snapshot apply) and its settle wait.
    Render,
    /// Runs after the surface settled.
    After,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookStage::Before => "before",
            HookStage::Render => "render",
            HookStage::After => "after",
        };
        f.write_str(name)
    }
}

/// Errors produced by the playback engine.
///
/// `Load`, `Parse` and `InvalidRecording` are fatal during initialization.
/// `Hook` and `RenderTimeout` only abort the render pass that raised them.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Failed to load recording {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse recording: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid recording: {0}")]
    InvalidRecording(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("The {stage} hook failed on frame {index}: {message}")]
    Hook {
        stage: HookStage,
        index: usize,
        message: String,
    },

    #[error("The {stage} step of frame {index} did not complete within {timeout:?}")]
    RenderTimeout {
        stage: HookStage,
        index: usize,
        timeout: Duration,
    },
}

impl PlayerError {
    /// True for errors that only abort the current render pass.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlayerError::Hook { .. } | PlayerError::RenderTimeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
