//! Repetition State Tracker
//!
//! Turns a stream of per-frame poses into accepted pose states, rep
//! counts and scores. One generic state machine serves every exercise;
//! the exercise definition supplies joints, thresholds and the counted
//! transition.
//!
//! Acceptance rule: a raw state is accepted only after it has been seen
//! in `state_confidence` consecutive evidence frames AND at least
//! `min_pose_interval_ms` has passed since the previous accepted
//! transition. The interval is a floor on top of confidence, so a rep
//! can only be counted once per accepted Down -> Up change.

use crate::logic::exercise::{ExerciseDefinition, StateFamily};
use crate::logic::geometry::{compute_exercise_angles, is_pose_visible, Pose};
use super::classify::{assess_form, classify};
use super::config::TrackerConfig;
use super::types::{PoseState, SessionStats, TrackerState};

pub const FEEDBACK_NOT_VISIBLE: &str = "Make sure your full body is visible to the camera";

/// Per-session tracker; owns TrackerState and SessionStats
#[derive(Debug, Clone)]
pub struct RepetitionTracker {
    definition: &'static ExerciseDefinition,
    config: TrackerConfig,
    state: TrackerState,
    stats: SessionStats,
    /// Previous visible frame, for hold-time accounting
    last_visible_at: Option<u64>,
}

impl RepetitionTracker {
    pub fn new(definition: &'static ExerciseDefinition, config: TrackerConfig) -> Self {
        Self {
            definition,
            config,
            state: TrackerState::default(),
            stats: SessionStats::default(),
            last_visible_at: None,
        }
    }

    pub fn definition(&self) -> &'static ExerciseDefinition {
        self.definition
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Current snapshot
    pub fn stats(&self) -> SessionStats {
        self.stats.clone()
    }

    /// Feed one frame (timestamp in ms) and return the updated snapshot
    pub fn process_frame(&mut self, pose: &Pose, timestamp_ms: u64) -> SessionStats {
        let threshold = self.config.angle_confidence;

        if !is_pose_visible(pose, self.definition, threshold) {
            self.stats.accuracy = 0;
            self.stats.pose_visible = false;
            self.stats.raw_state = None;
            self.stats.feedback = FEEDBACK_NOT_VISIBLE.to_string();
            self.last_visible_at = None;
            return self.stats();
        }

        self.accrue_hold(timestamp_ms);

        let angles = compute_exercise_angles(pose, self.definition, threshold);
        let raw = classify(self.definition, &angles);
        let form = assess_form(self.definition, &angles, raw, self.config.accuracy_penalty);

        self.stats.pose_visible = true;
        self.stats.raw_state = raw;
        self.stats.accuracy = form.accuracy;

        if let Some(raw) = raw {
            self.observe(raw, timestamp_ms);
        }

        self.stats.state = self.state.last_pose_state;
        self.stats.feedback = match form.hints.first() {
            Some(hint) => hint.to_string(),
            None => feedback_for(raw.or(self.state.last_pose_state)).to_string(),
        };

        self.stats()
    }

    /// Accumulate confidence for `raw` and accept it when allowed
    fn observe(&mut self, raw: PoseState, timestamp_ms: u64) {
        let required = self.config.required_frames();

        if self.state.candidate_state == Some(raw) {
            self.state.state_confidence = (self.state.state_confidence + 1).min(required);
        } else {
            self.state.candidate_state = Some(raw);
            self.state.state_confidence = 1;
        }

        if !raw.is_acceptable()
            || self.state.last_pose_state == Some(raw)
            || self.state.state_confidence < required
            || !self.interval_elapsed(timestamp_ms)
        {
            return;
        }

        self.accept(raw, timestamp_ms);
    }

    fn interval_elapsed(&self, timestamp_ms: u64) -> bool {
        match self.state.last_transition_at {
            Some(last) => timestamp_ms.saturating_sub(last) >= self.config.min_pose_interval_ms,
            None => true,
        }
    }

    fn accept(&mut self, next: PoseState, timestamp_ms: u64) {
        let previous = self.state.last_pose_state.replace(next);
        self.state.last_transition_at = Some(timestamp_ms);

        log::debug!(
            "{}: {} -> {} at {}ms",
            self.definition.kind,
            previous.map(|s| s.as_str()).unwrap_or("none"),
            next,
            timestamp_ms
        );

        let Some(counted) = self.definition.counted else {
            return;
        };
        if previous == Some(counted.from) && next == counted.to {
            self.stats.rep_count += 1;
            self.stats.score += self.rep_points();
            log::info!(
                "{} rep #{} (accuracy {}%, score {})",
                self.definition.kind,
                self.stats.rep_count,
                self.stats.accuracy,
                self.stats.score
            );
        }
    }

    /// Accuracy-weighted points for one rep
    fn rep_points(&self) -> u64 {
        let weighted = self.config.points_per_rep as f32 * self.stats.accuracy as f32 / 100.0;
        weighted.round() as u64
    }

    /// Sustained exercises score whole seconds spent in correct form
    fn accrue_hold(&mut self, timestamp_ms: u64) {
        let previous = self.last_visible_at.replace(timestamp_ms);
        if self.definition.family != StateFamily::Sustained
            || self.state.last_pose_state != Some(PoseState::Correct)
        {
            return;
        }
        if let Some(previous) = previous {
            self.stats.hold_ms += timestamp_ms.saturating_sub(previous);
            self.stats.score = self.stats.score.max(self.stats.hold_ms / 1000);
        }
    }
}

fn feedback_for(state: Option<PoseState>) -> &'static str {
    match state {
        None => "Get into the starting position",
        Some(PoseState::Up) => "Now lower yourself down",
        Some(PoseState::Down) => "Good depth, now push back up",
        Some(PoseState::Transition) => "Keep going",
        Some(PoseState::Correct) => "Great form, hold it",
        Some(PoseState::Incorrect) => "Adjust your position",
    }
}
