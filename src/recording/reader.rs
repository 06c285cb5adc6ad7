//! Recording parser.
//!
//! Parses recordings from file paths, readers, and strings. Every entry
//! point funnels into [`Recording::from_document`], which validates the
//! frame list before anything downstream sees it.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use super::{RawFrame, Recording, RecordingConfig};
use crate::error::{PlayerError, Result};
use crate::surface::BufferSnapshot;

/// On-disk shape of a recording.
#[derive(Debug, Deserialize)]
struct RecordingDocument {
    #[serde(default)]
    frames: Option<Vec<RawFrame>>,
    #[serde(default)]
    records: Option<Vec<RawFrame>>,
    #[serde(default)]
    config: Option<RecordingConfig>,
    #[serde(default)]
    thumbnail: Option<BufferSnapshot>,
}

impl Recording {
    /// Load a recording from a filesystem path.
    ///
    /// # Errors
    ///
    /// `Load` if the file cannot be opened, `Parse` if it is not valid JSON,
    /// `InvalidRecording` if the frame list is missing or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| PlayerError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let recording = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            frames = recording.frames.len(),
            "Loaded recording"
        );
        Ok(recording)
    }

    /// Parse a recording from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: RecordingDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Parse a recording from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RecordingDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    fn from_document(document: RecordingDocument) -> Result<Self> {
        let frames = document.frames.or(document.records).ok_or_else(|| {
            PlayerError::InvalidRecording(
                "recording has neither `frames` nor `records`".to_string(),
            )
        })?;

        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| !f.delay.is_finite() || f.delay < 0.0)
        {
            return Err(PlayerError::InvalidRecording(format!(
                "frame {} has invalid delay {}",
                index, frame.delay
            )));
        }

        Ok(Recording {
            config: document.config.unwrap_or_default(),
            frames,
            thumbnail: document.thumbnail,
        })
    }
}
