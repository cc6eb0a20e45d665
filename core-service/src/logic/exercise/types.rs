//! Exercise definition types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::logic::geometry::Landmark;
use crate::logic::tracker::PoseState;

// ============================================================================
// EXERCISE KIND
// ============================================================================

/// Supported exercise types (wire names match the records API)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    #[serde(rename = "pushup")]
    Pushup,
    #[serde(rename = "squat")]
    Squat,
    #[serde(rename = "lunges")]
    Lunges,
    #[serde(rename = "plank")]
    Plank,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 4] = [Self::Pushup, Self::Squat, Self::Lunges, Self::Plank];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pushup => "pushup",
            Self::Squat => "squat",
            Self::Lunges => "lunges",
            Self::Plank => "plank",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exercise type: {0}")]
pub struct UnknownExercise(pub String);

impl FromStr for ExerciseKind {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pushup" | "push-up" | "pushups" => Ok(Self::Pushup),
            "squat" | "squats" => Ok(Self::Squat),
            "lunges" | "lunge" => Ok(Self::Lunges),
            "plank" => Ok(Self::Plank),
            _ => Err(UnknownExercise(s.to_string())),
        }
    }
}

// ============================================================================
// JOINTS
// ============================================================================

/// Inclusive angle range in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Three landmarks; the middle one is the vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointTriple {
    pub a: Landmark,
    pub vertex: Landmark,
    pub c: Landmark,
}

impl JointTriple {
    pub const fn new(a: Landmark, vertex: Landmark, c: Landmark) -> Self {
        Self { a, vertex, c }
    }
}

/// Where an angle sits relative to a joint's target range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Below,
    Within,
    Above,
}

/// A measured joint: candidate landmark triples in fallback order
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JointSpec {
    pub name: &'static str,
    pub sides: &'static [JointTriple],
    pub target: AngleRange,
    pub tolerance: f32,
    /// Corrective hint shown when this joint is out of range
    pub hint: &'static str,
}

impl JointSpec {
    /// Classify an angle: outside the target only counts beyond tolerance
    pub fn zone(&self, angle: f32) -> Zone {
        if angle < self.target.min - self.tolerance {
            Zone::Below
        } else if angle > self.target.max + self.tolerance {
            Zone::Above
        } else {
            Zone::Within
        }
    }
}

// ============================================================================
// DEFINITION
// ============================================================================

/// How raw angles map to pose states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StateFamily {
    /// Up / Down only; mid-range frames leave the state untouched
    TwoState,
    /// Up / Down plus a feedback-only Transition label
    ThreeState,
    /// Correct / Incorrect, no repetitions
    Sustained,
}

/// How several primary joints combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JointRule {
    /// First measurable joint decides
    FirstAvailable,
    /// Every joint must be measurable and agree on the extreme
    AllAgree,
}

/// State change that counts as one repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountedTransition {
    pub from: PoseState,
    pub to: PoseState,
}

/// Static, data-driven description of one exercise
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseDefinition {
    pub kind: ExerciseKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required_keypoints: &'static [Landmark],
    pub primary: &'static [JointSpec],
    pub form: &'static [JointSpec],
    pub family: StateFamily,
    pub joint_rule: JointRule,
    pub counted: Option<CountedTransition>,
}

impl ExerciseDefinition {
    pub fn counts_reps(&self) -> bool {
        self.counted.is_some()
    }

    /// All joints whose angles are computed each frame
    pub fn joints(&self) -> impl Iterator<Item = &JointSpec> {
        self.primary.iter().chain(self.form.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!("push-up".parse::<ExerciseKind>(), Ok(ExerciseKind::Pushup));
        assert_eq!("Lunge".parse::<ExerciseKind>(), Ok(ExerciseKind::Lunges));
        assert!("burpee".parse::<ExerciseKind>().is_err());
    }

    #[test]
    fn test_kind_wire_format() {
        let json = serde_json::to_string(&ExerciseKind::Lunges).unwrap();
        assert_eq!(json, "\"lunges\"");
        let kind: ExerciseKind = serde_json::from_str("\"pushup\"").unwrap();
        assert_eq!(kind, ExerciseKind::Pushup);
    }

    #[test]
    fn test_zone_respects_tolerance() {
        let joint = JointSpec {
            name: "elbow",
            sides: &[],
            target: AngleRange::new(110.0, 150.0),
            tolerance: 10.0,
            hint: "",
        };
        assert_eq!(joint.zone(99.0), Zone::Below);
        assert_eq!(joint.zone(105.0), Zone::Within);
        assert_eq!(joint.zone(158.0), Zone::Within);
        assert_eq!(joint.zone(161.0), Zone::Above);
    }
}
