//! Tracker Configuration
//!
//! Debounce and scoring knobs for the repetition tracker.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tracker Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum keypoint score for angles and the visibility gate (0.0 - 1.0)
    pub angle_confidence: f32,

    /// Consecutive frames a raw state must be seen before acceptance
    pub state_confidence: u32,

    /// Floor between two accepted transitions (milliseconds)
    pub min_pose_interval_ms: u64,

    /// Accuracy lost per form deviation
    pub accuracy_penalty: u8,

    /// Points for one rep at 100% accuracy
    pub points_per_rep: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            angle_confidence: constants::DEFAULT_ANGLE_CONFIDENCE,
            state_confidence: constants::DEFAULT_STATE_CONFIDENCE,
            min_pose_interval_ms: constants::DEFAULT_MIN_POSE_INTERVAL_MS,
            accuracy_penalty: constants::DEFAULT_ACCURACY_PENALTY,
            points_per_rep: constants::DEFAULT_POINTS_PER_REP,
        }
    }
}

impl TrackerConfig {
    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            angle_confidence: constants::get_angle_confidence(),
            state_confidence: constants::get_state_confidence(),
            min_pose_interval_ms: constants::get_min_pose_interval_ms(),
            accuracy_penalty: constants::get_accuracy_penalty(),
            points_per_rep: constants::get_points_per_rep(),
        }
    }

    /// Noisy camera / low light: demand more evidence per transition
    pub fn strict() -> Self {
        Self {
            angle_confidence: 0.5,
            state_confidence: 3,
            min_pose_interval_ms: 400,
            ..Default::default()
        }
    }

    /// Fast movers: accept transitions sooner
    pub fn lenient() -> Self {
        Self {
            state_confidence: 1,
            min_pose_interval_ms: 200,
            ..Default::default()
        }
    }

    /// Frames required before acceptance, never below one
    pub fn required_frames(&self) -> u32 {
        self.state_confidence.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.angle_confidence, 0.3);
        assert_eq!(config.state_confidence, 2);
        assert_eq!(config.min_pose_interval_ms, 300);
        assert_eq!(config.accuracy_penalty, 15);
    }

    #[test]
    fn test_required_frames_floor() {
        let config = TrackerConfig {
            state_confidence: 0,
            ..Default::default()
        };
        assert_eq!(config.required_frames(), 1);
        assert_eq!(TrackerConfig::strict().required_frames(), 3);
    }

    #[test]
    fn test_config_serde() {
        let config = TrackerConfig::lenient();
        let json = serde_json::to_string(&config).unwrap();
        let back: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
