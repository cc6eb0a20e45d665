//! User profile handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::models::{RegisterUser, UpdateProfile, User, WorkoutStats};
use crate::middleware::auth::UserContext;

/// Create the caller's profile on first sign-in
pub async fn register(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let profile = User::register(&state.pool, &user.user_id, &user.email, &req).await?;
    tracing::info!("Registered profile for {}", user.user_id);

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    user: UserContext,
) -> AppResult<Json<User>> {
    let profile = User::find_by_uid(&state.pool, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<UpdateProfile>,
) -> AppResult<Json<User>> {
    req.validate()?;

    let profile = User::update_profile(&state.pool, &user.user_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}

/// Fold one workout into the caller's totals
pub async fn update_stats(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<WorkoutStats>,
) -> AppResult<Json<User>> {
    req.validate()?;

    let profile = User::apply_workout(&state.pool, &user.user_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(profile))
}
