//! Storage Module - persistence of finished session records

pub mod jsonl;

pub use jsonl::{default_records_path, JsonlRecordStore};

use crate::logic::session::ExerciseRecord;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where finished sessions go
pub trait RecordStore {
    /// Persist one record; a single attempt, never retried
    fn save(&self, record: &ExerciseRecord) -> Result<(), RecordError>;

    /// Up to `limit` most recent records for `user_id`, newest first
    fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<ExerciseRecord>, RecordError>;
}
