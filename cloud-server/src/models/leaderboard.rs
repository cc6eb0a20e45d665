//! Leaderboard model

use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

pub const LEADERBOARD_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrame {
    Weekly,
    Monthly,
    AllTime,
}

impl TimeFrame {
    /// Earliest last-activity date that still qualifies
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Weekly => Some(now - Duration::days(7)),
            Self::Monthly => Some(now.checked_sub_months(Months::new(1)).unwrap_or(now - Duration::days(30))),
            Self::AllTime => None,
        }
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "all-time" | "alltime" => Ok(Self::AllTime),
            other => Err(format!("Unknown time frame '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    pub points: i64,
    pub total_workouts: i32,
    pub total_exercises: i64,
    pub accuracy: i32,
}

impl LeaderboardEntry {
    /// Top users by points, optionally restricted to recent activity
    pub async fn top(pool: &PgPool, since: Option<DateTime<Utc>>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT username, points, total_workouts, total_exercises, accuracy
            FROM users
            WHERE $1::timestamptz IS NULL OR last_exercise_date >= $1
            ORDER BY points DESC
            LIMIT $2
            "#
        )
        .bind(since)
        .bind(LEADERBOARD_SIZE)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time_frame() {
        assert_eq!("weekly".parse::<TimeFrame>(), Ok(TimeFrame::Weekly));
        assert_eq!("monthly".parse::<TimeFrame>(), Ok(TimeFrame::Monthly));
        assert_eq!("all-time".parse::<TimeFrame>(), Ok(TimeFrame::AllTime));
        assert!("yearly".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn test_cutoffs() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(
            TimeFrame::Weekly.cutoff(now),
            Some(Utc.with_ymd_and_hms(2026, 3, 24, 12, 0, 0).unwrap())
        );
        // Clamped to the end of February
        assert_eq!(
            TimeFrame::Monthly.cutoff(now),
            Some(Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap())
        );
        assert_eq!(TimeFrame::AllTime.cutoff(now), None);
    }
}
