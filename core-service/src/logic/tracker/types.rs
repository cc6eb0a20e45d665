use serde::{Deserialize, Serialize};

/// Discrete pose state of the current exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseState {
    Up,
    Down,
    /// Mid-range, feedback only, never accepted as a state
    Transition,
    Correct,
    Incorrect,
}

impl PoseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Transition => "transition",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    /// Whether the state machine may settle in this state
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Self::Transition)
    }
}

impl std::fmt::Display for PoseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Debounce state, one per session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Last accepted state
    pub last_pose_state: Option<PoseState>,
    /// Raw state currently accumulating confidence
    pub candidate_state: Option<PoseState>,
    /// Consecutive frames the candidate has been seen (capped)
    pub state_confidence: u32,
    /// Timestamp of the last accepted transition (ms)
    pub last_transition_at: Option<u64>,
}

/// Snapshot returned to the rendering layer after every frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rep_count: u32,
    /// Latest frame's form accuracy (0 - 100)
    pub accuracy: u8,
    pub score: u64,
    pub feedback: String,
    /// Last accepted state
    pub state: Option<PoseState>,
    /// Raw state of the latest frame
    pub raw_state: Option<PoseState>,
    pub pose_visible: bool,
    /// Time held in correct form (sustained exercises)
    pub hold_ms: u64,
}
