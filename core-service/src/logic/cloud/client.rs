//! Cloud API Client
//!
//! HTTP client for the FitRep cloud server. Uploads are a single attempt;
//! failures are surfaced to the caller and never retried here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::logic::exercise::ExerciseKind;
use crate::logic::session::ExerciseRecord;

/// Cloud server configuration
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub server_url: String,
    pub timeout_seconds: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            server_url: constants::get_cloud_url(),
            timeout_seconds: constants::DEFAULT_UPLOAD_TIMEOUT_SECS,
        }
    }
}

/// Cloud API client
pub struct CloudClient {
    config: CloudConfig,
    http_client: reqwest::Client,
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct RecordUploadRequest {
    pub exercise_type: ExerciseKind,
    pub reps: u32,
    pub accuracy: u8,
    pub score: u64,
    pub duration_secs: Option<u64>,
}

impl From<&ExerciseRecord> for RecordUploadRequest {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            exercise_type: record.exercise_type,
            reps: record.reps,
            accuracy: record.accuracy,
            score: record.score,
            duration_secs: Some(record.duration_secs),
        }
    }
}

/// A record as stored by the server
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_type: ExerciseKind,
    pub reps: u32,
    pub accuracy: u8,
    pub score: u64,
    pub duration_secs: Option<u64>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl CloudClient {
    pub fn new(config: CloudConfig) -> Result<Self, CloudError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CloudError::NetworkError(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<HealthResponse, CloudError> {
        let url = format!("{}/api/v1/health", self.config.server_url);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CloudError::NetworkError(e.to_string()))?;

        Self::parse(response).await
    }

    /// Upload one finished session
    pub async fn upload_record(&self, record: &ExerciseRecord, token: &str) -> Result<RemoteRecord, CloudError> {
        let url = format!("{}/api/v1/exercises/record", self.config.server_url);

        log::info!("Uploading record {} to {}", record.id, self.config.server_url);

        let response = self.http_client
            .post(&url)
            .bearer_auth(token)
            .json(&RecordUploadRequest::from(record))
            .send()
            .await
            .map_err(|e| CloudError::NetworkError(e.to_string()))?;

        Self::parse(response).await
    }

    /// Most recent records for the token's user, newest first
    pub async fn history(&self, token: &str, limit: usize) -> Result<Vec<RemoteRecord>, CloudError> {
        let url = format!("{}/api/v1/exercises/history", self.config.server_url);

        let response = self.http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| CloudError::NetworkError(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, CloudError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await
                .map_err(|e| CloudError::ParseError(e.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CloudError::Unauthorized);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_default();
        log::error!("Cloud request failed ({}): {}", status, message);
        Err(CloudError::ServerError(status.as_u16(), message))
    }
}

/// Cloud client errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum CloudError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unauthorized")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_wire_format() {
        let record = ExerciseRecord {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            exercise_type: ExerciseKind::Lunges,
            reps: 12,
            accuracy: 88,
            score: 106,
            duration_secs: 95,
            recorded_at: Utc::now(),
        };

        let json = serde_json::to_value(RecordUploadRequest::from(&record)).unwrap();
        assert_eq!(json["exercise_type"], "lunges");
        assert_eq!(json["reps"], 12);
        assert_eq!(json["duration_secs"], 95);
        // The server derives the user from the token
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_remote_record_parses_server_row() {
        let body = r#"{
            "id": "6f1c1f0e-5d7a-4f43-9a51-0b3a3c1f2b10",
            "user_id": "user-1",
            "exercise_type": "plank",
            "reps": 0,
            "accuracy": 97,
            "score": 45,
            "duration_secs": null,
            "recorded_at": "2026-03-01T08:00:00Z"
        }"#;
        let record: RemoteRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.exercise_type, ExerciseKind::Plank);
        assert_eq!(record.duration_secs, None);
    }

    #[test]
    fn test_default_config_uses_constants() {
        let config = CloudConfig::default();
        assert!(!config.server_url.is_empty());
        assert_eq!(config.timeout_seconds, crate::constants::DEFAULT_UPLOAD_TIMEOUT_SECS);
    }
}
