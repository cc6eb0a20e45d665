//! Tracker Module - repetition state machine
//!
//! Geometry produces angles, `classify` turns them into a raw state,
//! `RepetitionTracker` debounces raw states into accepted transitions
//! and keeps the session statistics.

pub mod types;
pub mod config;
pub mod classify;
pub mod engine;


pub use types::{PoseState, SessionStats, TrackerState};
pub use config::TrackerConfig;
pub use classify::{assess_form, classify, FormReport};
pub use engine::{RepetitionTracker, FEEDBACK_NOT_VISIBLE};
