use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::logic::session::ExerciseRecord;
use super::{RecordError, RecordStore};

/// `<data dir>/fitrep/records.jsonl`
pub fn default_records_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitrep")
        .join("records.jsonl")
}

/// Append-only JSON-lines record file
pub struct JsonlRecordStore {
    path: PathBuf,
    // Serializes appends from concurrent sessions
    lock: Mutex<()>,
}

impl JsonlRecordStore {
    pub fn new() -> Self {
        Self::from_path(default_records_path())
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ExerciseRecord>, RecordError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ExerciseRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping corrupt record at {}:{}: {}", self.path.display(), i + 1, e),
            }
        }
        Ok(records)
    }
}

impl Default for JsonlRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for JsonlRecordStore {
    fn save(&self, record: &ExerciseRecord) -> Result<(), RecordError> {
        let _guard = self.lock.lock();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(record)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", json)?;

        log::debug!("Saved record {} to {}", record.id, self.path.display());
        Ok(())
    }

    fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<ExerciseRecord>, RecordError> {
        let _guard = self.lock.lock();

        let mut records: Vec<ExerciseRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();

        // Stable sort keeps file order for equal timestamps; reverse after
        records.sort_by_key(|r| r.recorded_at);
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}
