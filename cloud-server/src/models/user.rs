//! User model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use chrono::{DateTime, Utc};
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub fitness_level: String,
    pub total_workouts: i32,
    pub total_exercises: i64,
    pub points: i64,
    pub accuracy: i32,
    pub last_exercise_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(range(min = 0.0, max = 300.0))]
    pub height: Option<f32>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub weight: Option<f32>,
    pub fitness_level: Option<FitnessLevel>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 100))]
    pub username: Option<String>,
    #[validate(range(min = 0.0, max = 300.0))]
    pub height: Option<f32>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub weight: Option<f32>,
    pub fitness_level: Option<FitnessLevel>,
}

/// One finished workout applied to the running totals
#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutStats {
    #[validate(range(min = 0))]
    pub exercises: i64,
    #[validate(range(min = 0))]
    pub points: i64,
    #[validate(range(min = 0, max = 100))]
    pub accuracy: i32,
}

/// Default username: local part of the email address
pub fn username_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        "athlete".to_string()
    } else {
        local.to_string()
    }
}

impl User {
    /// Create the profile if it does not exist yet; never overwrites
    pub async fn register(pool: &PgPool, uid: &str, email: &str, data: &RegisterUser) -> Result<Self, sqlx::Error> {
        let username = data
            .username
            .clone()
            .unwrap_or_else(|| username_from_email(email));
        let fitness_level = data.fitness_level.unwrap_or(FitnessLevel::Beginner);

        sqlx::query(
            r#"
            INSERT INTO users (uid, email, username, height, weight, fitness_level)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (uid) DO NOTHING
            "#
        )
        .bind(uid)
        .bind(email)
        .bind(&username)
        .bind(data.height)
        .bind(data.weight)
        .bind(fitness_level.as_str())
        .execute(pool)
        .await?;

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_uid(pool: &PgPool, uid: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_profile(pool: &PgPool, uid: &str, data: &UpdateProfile) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                height = COALESCE($3, height),
                weight = COALESCE($4, weight),
                fitness_level = COALESCE($5, fitness_level),
                updated_at = NOW()
            WHERE uid = $1
            RETURNING *
            "#
        )
        .bind(uid)
        .bind(&data.username)
        .bind(data.height)
        .bind(data.weight)
        .bind(data.fitness_level.map(|l| l.as_str()))
        .fetch_optional(pool)
        .await
    }

    /// Apply one workout to the totals; usable inside a transaction
    pub async fn apply_workout<'e, E>(executor: E, uid: &str, stats: &WorkoutStats) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                total_workouts = total_workouts + 1,
                total_exercises = total_exercises + $2,
                points = points + $3,
                accuracy = $4,
                last_exercise_date = NOW(),
                updated_at = NOW()
            WHERE uid = $1
            RETURNING *
            "#
        )
        .bind(uid)
        .bind(stats.exercises)
        .bind(stats.points)
        .bind(stats.accuracy)
        .fetch_optional(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_from_email() {
        assert_eq!(username_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(username_from_email("no-at-sign"), "no-at-sign");
        assert_eq!(username_from_email("@example.com"), "athlete");
        assert_eq!(username_from_email(""), "athlete");
    }

    #[test]
    fn test_workout_stats_validation() {
        let ok = WorkoutStats { exercises: 20, points: 180, accuracy: 90 };
        assert!(ok.validate().is_ok());

        let bad = WorkoutStats { exercises: 20, points: 180, accuracy: 140 };
        assert!(bad.validate().is_err());

        let negative = WorkoutStats { exercises: -1, points: 0, accuracy: 50 };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_fitness_level_wire_names() {
        let level: FitnessLevel = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(level, FitnessLevel::Intermediate);
        assert!(serde_json::from_str::<FitnessLevel>("\"elite\"").is_err());
    }
}
