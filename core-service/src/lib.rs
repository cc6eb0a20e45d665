//! FitRep core: pose geometry, exercise catalog and repetition tracking.

pub mod constants;
pub mod logic;

pub use logic::exercise::{ExerciseDefinition, ExerciseKind};
pub use logic::geometry::{Keypoint, Landmark, Pose};
pub use logic::session::{ExerciseRecord, ExerciseSession, SessionError, SessionRunner, StopHandle};
pub use logic::tracker::{PoseState, RepetitionTracker, SessionStats, TrackerConfig};
