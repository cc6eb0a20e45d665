//! Exercise record handlers

use axum::{extract::{State, Query}, http::StatusCode, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{ExerciseRecord, HistoryQuery, RecordExercise};
use crate::middleware::auth::UserContext;

/// Store a finished session and update the caller's stats
pub async fn record(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<RecordExercise>,
) -> AppResult<(StatusCode, Json<ExerciseRecord>)> {
    req.validate()?;

    let record = ExerciseRecord::create_with_stats(&state.pool, &user.user_id, &req).await?;
    tracing::info!(
        "Recorded {} x{} for {} (score {})",
        record.exercise_type, record.reps, user.user_id, record.score
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Most recent records, newest first
pub async fn history(
    State(state): State<AppState>,
    user: UserContext,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<ExerciseRecord>>> {
    let limit = query.effective_limit(state.config.history_limit_max);
    let records = ExerciseRecord::history(&state.pool, &user.user_id, limit).await?;
    Ok(Json(records))
}
