//! Pose sources
//!
//! The pose model is a black box: per call it yields one frame with zero
//! or one detected poses. `RecordedPoseSource` replays a JSON-lines
//! recording of such frames; `ReplayCapture` wraps a recording file as a
//! capture device so replays go through the same session lifecycle as a
//! live camera.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logic::geometry::Pose;
use super::capture::{CaptureDevice, CaptureError};

/// One captured frame after pose estimation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub poses: Vec<Pose>,
}

impl Frame {
    /// The single tracked pose, if one was detected
    pub fn primary_pose(&self) -> Option<&Pose> {
        self.poses.first()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error reading frames: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Pull-based pose source, one frame per call
pub trait PoseSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}

/// Replays frames from JSON lines
pub struct RecordedPoseSource<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> RecordedPoseSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl RecordedPoseSource<BufReader<File>> {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> PoseSource for RecordedPoseSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame = serde_json::from_str(&line).map_err(|source| SourceError::Malformed {
                line: self.line_no,
                source,
            })?;
            return Ok(Some(frame));
        }
        Ok(None)
    }
}

/// A recording file acting as the capture device
pub struct ReplayCapture {
    path: PathBuf,
    source: Option<RecordedPoseSource<BufReader<File>>>,
}

impl ReplayCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureDevice for ReplayCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        let source = RecordedPoseSource::open(&self.path).map_err(|e| {
            CaptureError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        self.source = Some(source);
        Ok(())
    }

    fn stop(&mut self) {
        self.source = None;
    }

    fn is_active(&self) -> bool {
        self.source.is_some()
    }
}

impl PoseSource for ReplayCapture {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        match self.source.as_mut() {
            Some(source) => source.next_frame(),
            // Stopped devices produce nothing
            None => Ok(None),
        }
    }
}
