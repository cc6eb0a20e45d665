//! Health check handler

use axum::Json;
use fitrep_core::ExerciseKind;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Exercise types accepted by the records API
    exercises: Vec<&'static str>,
    timestamp: i64,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        exercises: ExerciseKind::ALL.iter().map(|k| k.as_str()).collect(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
