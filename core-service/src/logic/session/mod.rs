//! Session Module - capture lifetime, pose sources, session lifecycle

pub mod capture;
pub mod source;
pub mod record;
#[allow(clippy::module_inception)]
pub mod session;

pub use capture::{CaptureDevice, CaptureError, CaptureGuard};
pub use source::{Frame, PoseSource, RecordedPoseSource, ReplayCapture, SourceError};
pub use record::ExerciseRecord;
pub use session::{ExerciseSession, FramePoll, SessionError, SessionRunner, StopHandle};
