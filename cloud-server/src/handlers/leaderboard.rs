//! Leaderboard handler

use axum::{extract::{State, Path}, Json};
use chrono::Utc;

use crate::{AppState, AppResult, AppError};
use crate::models::{LeaderboardEntry, TimeFrame};

/// Top users by points for `weekly`, `monthly` or `all-time`
pub async fn get(
    State(state): State<AppState>,
    Path(time_frame): Path<String>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let frame: TimeFrame = time_frame.parse().map_err(AppError::ValidationError)?;

    let entries = LeaderboardEntry::top(&state.pool, frame.cutoff(Utc::now())).await?;
    Ok(Json(entries))
}
