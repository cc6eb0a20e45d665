//! Challenge model

use chrono::{DateTime, Utc};
use fitrep_core::ExerciseKind;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub exercise_type: String,
    pub target_reps: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Participant {
    pub challenge_id: Uuid,
    pub user_id: String,
    pub username: String,
    pub completed_reps: i32,
    pub accuracy: i32,
    pub score: i64,
    pub last_updated: DateTime<Utc>,
}

/// Challenge with its participants, best score first
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeDetail {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallenge {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub exercise_type: ExerciseKind,
    #[validate(range(min = 1))]
    pub target_reps: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl CreateChallenge {
    pub fn has_valid_window(&self) -> bool {
        self.start_date < self.end_date
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProgressUpdate {
    #[validate(range(min = 0))]
    pub reps: i32,
    #[validate(range(min = 0, max = 100))]
    pub accuracy: i32,
    #[validate(range(min = 0))]
    pub score: i64,
}

impl Challenge {
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == "active" && self.end_date >= now
    }

    /// Create a challenge with its creator as the first participant
    pub async fn create(
        pool: &PgPool,
        creator_id: &str,
        creator_name: &str,
        data: &CreateChallenge,
    ) -> Result<ChallengeDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            INSERT INTO challenges (title, description, exercise_type, target_reps, start_date, end_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.exercise_type.as_str())
        .bind(data.target_reps)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        let creator = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO challenge_participants (challenge_id, user_id, username)
            VALUES ($1, $2, $3)
            RETURNING *
            "#
        )
        .bind(challenge.id)
        .bind(creator_id)
        .bind(creator_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ChallengeDetail {
            challenge,
            participants: vec![creator],
        })
    }

    /// Open challenges, soonest start first
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Challenge>(
            r#"
            SELECT * FROM challenges
            WHERE status = 'active' AND end_date >= NOW()
            ORDER BY start_date ASC
            "#
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Challenge>("SELECT * FROM challenges WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn participants(pool: &PgPool, id: Uuid) -> Result<Vec<Participant>, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM challenge_participants
            WHERE challenge_id = $1
            ORDER BY score DESC, completed_reps DESC
            "#
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    pub async fn detail(pool: &PgPool, id: Uuid) -> Result<Option<ChallengeDetail>, sqlx::Error> {
        let Some(challenge) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let participants = Self::participants(pool, id).await?;
        Ok(Some(ChallengeDetail { challenge, participants }))
    }

    /// Returns false when the user already participates
    pub async fn join(pool: &PgPool, id: Uuid, user_id: &str, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO challenge_participants (challenge_id, user_id, username)
            VALUES ($1, $2, $3)
            ON CONFLICT (challenge_id, user_id) DO NOTHING
            "#
        )
        .bind(id)
        .bind(user_id)
        .bind(username)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// None when the user is not a participant
    pub async fn update_progress(
        pool: &PgPool,
        id: Uuid,
        user_id: &str,
        progress: &ProgressUpdate,
    ) -> Result<Option<Participant>, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            r#"
            UPDATE challenge_participants SET
                completed_reps = completed_reps + $3,
                accuracy = $4,
                score = score + $5,
                last_updated = NOW()
            WHERE challenge_id = $1 AND user_id = $2
            RETURNING *
            "#
        )
        .bind(id)
        .bind(user_id)
        .bind(progress.reps)
        .bind(progress.accuracy)
        .bind(progress.score)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn challenge(status: &str, end_in_days: i64) -> Challenge {
        let now = Utc::now();
        Challenge {
            id: Uuid::new_v4(),
            title: "100 squats".to_string(),
            description: "A week of squats".to_string(),
            exercise_type: "squat".to_string(),
            target_reps: 100,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(end_in_days),
            status: status.to_string(),
            created_by: "user-1".to_string(),
            created_at: now,
        }
    }

    #[test]
    fn test_is_open() {
        let now = Utc::now();
        assert!(challenge("active", 3).is_open(now));
        assert!(!challenge("active", -1).is_open(now));
        assert!(!challenge("completed", 3).is_open(now));
    }

    #[test]
    fn test_create_payload_window_and_target() {
        let payload: CreateChallenge = serde_json::from_str(
            r#"{
                "title": "Plank week",
                "description": "Hold it",
                "exercise_type": "plank",
                "target_reps": 0,
                "start_date": "2026-05-10T00:00:00Z",
                "end_date": "2026-05-03T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(payload.validate().is_err());
        assert!(!payload.has_valid_window());
    }
}
