//! Exercise record model

use chrono::{DateTime, Utc};
use fitrep_core::ExerciseKind;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use super::user::{User, WorkoutStats};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_type: String,
    pub reps: i32,
    pub accuracy: i32,
    pub score: i64,
    pub duration_secs: Option<i32>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordExercise {
    pub exercise_type: ExerciseKind,
    #[validate(range(min = 0))]
    pub reps: i32,
    #[validate(range(min = 0, max = 100))]
    pub accuracy: i32,
    #[validate(range(min = 0))]
    pub score: i64,
    #[validate(range(min = 0))]
    pub duration_secs: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

impl HistoryQuery {
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Requested limit, clamped to `1..=max`
    pub fn effective_limit(&self, max: i64) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, max.max(1))
    }
}

impl ExerciseRecord {
    /// Store a record and fold it into the user's totals atomically
    pub async fn create_with_stats(pool: &PgPool, user_id: &str, data: &RecordExercise) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            INSERT INTO exercise_records (user_id, exercise_type, reps, accuracy, score, duration_secs)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(user_id)
        .bind(data.exercise_type.as_str())
        .bind(data.reps)
        .bind(data.accuracy)
        .bind(data.score)
        .bind(data.duration_secs)
        .fetch_one(&mut *tx)
        .await?;

        let stats = WorkoutStats {
            exercises: data.reps as i64,
            points: data.score,
            accuracy: data.accuracy,
        };
        if User::apply_workout(&mut *tx, user_id, &stats).await?.is_none() {
            tracing::warn!("Record {} stored for unregistered user {}", record.id, user_id);
        }

        tx.commit().await?;
        Ok(record)
    }

    /// Newest first
    pub async fn history(pool: &PgPool, user_id: &str, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT * FROM exercise_records
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            LIMIT $2
            "#
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_defaults_and_clamps() {
        assert_eq!(HistoryQuery { limit: None }.effective_limit(100), 10);
        assert_eq!(HistoryQuery { limit: Some(25) }.effective_limit(100), 25);
        assert_eq!(HistoryQuery { limit: Some(5000) }.effective_limit(100), 100);
        assert_eq!(HistoryQuery { limit: Some(0) }.effective_limit(100), 1);
    }

    #[test]
    fn test_record_payload_validation() {
        let payload: RecordExercise = serde_json::from_str(
            r#"{"exercise_type":"squat","reps":0,"accuracy":0,"score":0,"duration_secs":null}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());

        let payload: RecordExercise = serde_json::from_str(
            r#"{"exercise_type":"pushup","reps":10,"accuracy":101,"score":90}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_unknown_exercise_type_rejected() {
        let parsed = serde_json::from_str::<RecordExercise>(
            r#"{"exercise_type":"burpee","reps":1,"accuracy":50,"score":5}"#,
        );
        assert!(parsed.is_err());
    }
}
