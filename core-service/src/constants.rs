//! Central Configuration Constants
//!
//! Single source of truth for tracker and client defaults.
//! Every value can be overridden from the environment.

/// Default cloud server URL
///
/// For development: http://localhost:8080
pub const DEFAULT_CLOUD_URL: &str = "http://localhost:8080";

/// Minimum keypoint score for an angle to be computed
pub const DEFAULT_ANGLE_CONFIDENCE: f32 = 0.3;

/// Consecutive frames a raw state must be seen before it is accepted
pub const DEFAULT_STATE_CONFIDENCE: u32 = 2;

/// Minimum time between two accepted pose transitions (milliseconds)
pub const DEFAULT_MIN_POSE_INTERVAL_MS: u64 = 300;

/// Accuracy lost per form deviation in a frame
pub const DEFAULT_ACCURACY_PENALTY: u8 = 15;

/// Points awarded for a rep performed at 100% accuracy
pub const DEFAULT_POINTS_PER_REP: u32 = 10;

/// Number of records returned by a history lookup
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// HTTP timeout for record upload (seconds)
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 15;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "FitRep";

// ============================================
// Helper functions to read from env with fallback
// ============================================

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get cloud server URL from environment or use default
pub fn get_cloud_url() -> String {
    std::env::var("FITREP_CLOUD_URL")
        .unwrap_or_else(|_| DEFAULT_CLOUD_URL.to_string())
}

/// Get angle confidence threshold from environment or use default
pub fn get_angle_confidence() -> f32 {
    env_or("FITREP_ANGLE_CONFIDENCE", DEFAULT_ANGLE_CONFIDENCE)
}

/// Get state confidence threshold from environment or use default
pub fn get_state_confidence() -> u32 {
    env_or("FITREP_STATE_CONFIDENCE", DEFAULT_STATE_CONFIDENCE)
}

/// Get minimum pose interval from environment or use default
pub fn get_min_pose_interval_ms() -> u64 {
    env_or("FITREP_MIN_POSE_INTERVAL_MS", DEFAULT_MIN_POSE_INTERVAL_MS)
}

/// Get accuracy penalty from environment or use default
pub fn get_accuracy_penalty() -> u8 {
    env_or("FITREP_ACCURACY_PENALTY", DEFAULT_ACCURACY_PENALTY)
}

/// Get points per rep from environment or use default
pub fn get_points_per_rep() -> u32 {
    env_or("FITREP_POINTS_PER_REP", DEFAULT_POINTS_PER_REP)
}
