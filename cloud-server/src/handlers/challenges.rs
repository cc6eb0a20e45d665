//! Challenge handlers

use axum::{extract::{State, Path}, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::models::{username_from_email, Challenge, ChallengeDetail, CreateChallenge, Participant, ProgressUpdate};
use crate::middleware::auth::UserContext;

pub async fn create(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<CreateChallenge>,
) -> AppResult<(StatusCode, Json<ChallengeDetail>)> {
    req.validate()?;
    if !req.has_valid_window() {
        return Err(AppError::ValidationError("start_date must be before end_date".to_string()));
    }

    let detail = Challenge::create(&state.pool, &user.user_id, &username_from_email(&user.email), &req).await?;
    tracing::info!("Challenge {} created by {}", detail.challenge.id, user.user_id);

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Active challenges that have not ended
pub async fn list(
    State(state): State<AppState>,
    _user: UserContext,
) -> AppResult<Json<Vec<Challenge>>> {
    let challenges = Challenge::list_active(&state.pool).await?;
    Ok(Json(challenges))
}

pub async fn get(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ChallengeDetail>> {
    let detail = Challenge::detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

    Ok(Json(detail))
}

pub async fn join(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ChallengeDetail>> {
    let challenge = Challenge::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

    if !challenge.is_open(Utc::now()) {
        return Err(AppError::ValidationError("Challenge is closed".to_string()));
    }

    let joined = Challenge::join(&state.pool, id, &user.user_id, &username_from_email(&user.email)).await?;
    if !joined {
        return Err(AppError::ValidationError("Already participating in this challenge".to_string()));
    }

    let participants = Challenge::participants(&state.pool, id).await?;
    Ok(Json(ChallengeDetail { challenge, participants }))
}

pub async fn update_progress(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Json(req): Json<ProgressUpdate>,
) -> AppResult<Json<Participant>> {
    req.validate()?;

    if Challenge::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("Challenge not found".to_string()));
    }

    let participant = Challenge::update_progress(&state.pool, id, &user.user_id, &req)
        .await?
        .ok_or_else(|| AppError::ValidationError("Not participating in this challenge".to_string()))?;

    Ok(Json(participant))
}
