use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::exercise::ExerciseKind;

/// Finalized result of one exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_type: ExerciseKind,
    pub reps: u32,
    /// Mean form accuracy over visible frames (0 - 100)
    pub accuracy: u8,
    pub score: u64,
    pub duration_secs: u64,
    pub recorded_at: DateTime<Utc>,
}

impl ExerciseRecord {
    pub fn summary(&self) -> String {
        format!(
            "{} x{} ({}% accuracy, {} pts, {}s)",
            self.exercise_type, self.reps, self.accuracy, self.score, self.duration_secs
        )
    }
}
