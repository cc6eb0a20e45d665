//! Built-in exercise catalog
//!
//! Adding an exercise is a data change: describe its joints and
//! state family here, the tracker needs no new code.

use crate::logic::geometry::Landmark::*;
use crate::logic::tracker::PoseState;
use super::types::*;

const LEFT_ARM: JointTriple = JointTriple::new(LeftShoulder, LeftElbow, LeftWrist);
const RIGHT_ARM: JointTriple = JointTriple::new(RightShoulder, RightElbow, RightWrist);
const LEFT_LEG: JointTriple = JointTriple::new(LeftHip, LeftKnee, LeftAnkle);
const RIGHT_LEG: JointTriple = JointTriple::new(RightHip, RightKnee, RightAnkle);
const LEFT_BODY_LINE: JointTriple = JointTriple::new(LeftShoulder, LeftHip, LeftAnkle);
const RIGHT_BODY_LINE: JointTriple = JointTriple::new(RightShoulder, RightHip, RightAnkle);
const LEFT_TORSO: JointTriple = JointTriple::new(LeftShoulder, LeftHip, LeftKnee);
const RIGHT_TORSO: JointTriple = JointTriple::new(RightShoulder, RightHip, RightKnee);

const DOWN_TO_UP: Option<CountedTransition> = Some(CountedTransition {
    from: PoseState::Down,
    to: PoseState::Up,
});

const BODY_LINE: JointSpec = JointSpec {
    name: "body_line",
    sides: &[LEFT_BODY_LINE, RIGHT_BODY_LINE],
    target: AngleRange::new(160.0, 180.0),
    tolerance: 10.0,
    hint: "Keep your body in a straight line",
};

pub static PUSHUP: ExerciseDefinition = ExerciseDefinition {
    kind: ExerciseKind::Pushup,
    name: "Push-ups",
    description: "Upper body strength exercise",
    required_keypoints: &[],
    primary: &[JointSpec {
        name: "elbow",
        sides: &[LEFT_ARM, RIGHT_ARM],
        target: AngleRange::new(110.0, 150.0),
        tolerance: 10.0,
        hint: "Bend your elbows further",
    }],
    form: &[BODY_LINE],
    family: StateFamily::TwoState,
    joint_rule: JointRule::FirstAvailable,
    counted: DOWN_TO_UP,
};

pub static SQUAT: ExerciseDefinition = ExerciseDefinition {
    kind: ExerciseKind::Squat,
    name: "Squats",
    description: "Lower body strength exercise",
    required_keypoints: &[],
    primary: &[JointSpec {
        name: "knee",
        sides: &[LEFT_LEG, RIGHT_LEG],
        target: AngleRange::new(120.0, 150.0),
        tolerance: 10.0,
        hint: "Squat deeper",
    }],
    form: &[JointSpec {
        name: "torso",
        sides: &[LEFT_TORSO, RIGHT_TORSO],
        target: AngleRange::new(50.0, 180.0),
        tolerance: 10.0,
        hint: "Keep your chest up",
    }],
    family: StateFamily::TwoState,
    joint_rule: JointRule::FirstAvailable,
    counted: DOWN_TO_UP,
};

pub static LUNGES: ExerciseDefinition = ExerciseDefinition {
    kind: ExerciseKind::Lunges,
    name: "Lunges",
    description: "Single-leg lower body exercise",
    required_keypoints: &[LeftHip, RightHip, LeftKnee, RightKnee, LeftAnkle, RightAnkle],
    primary: &[
        JointSpec {
            name: "left_knee",
            sides: &[LEFT_LEG],
            target: AngleRange::new(100.0, 150.0),
            tolerance: 10.0,
            hint: "Bend your left knee further",
        },
        JointSpec {
            name: "right_knee",
            sides: &[RIGHT_LEG],
            target: AngleRange::new(100.0, 150.0),
            tolerance: 10.0,
            hint: "Bend your right knee further",
        },
    ],
    form: &[],
    family: StateFamily::ThreeState,
    joint_rule: JointRule::AllAgree,
    counted: DOWN_TO_UP,
};

pub static PLANK: ExerciseDefinition = ExerciseDefinition {
    kind: ExerciseKind::Plank,
    name: "Plank",
    description: "Core stability hold",
    required_keypoints: &[],
    primary: &[JointSpec {
        name: "elbow",
        sides: &[LEFT_ARM, RIGHT_ARM],
        target: AngleRange::new(70.0, 110.0),
        tolerance: 0.0,
        hint: "Keep your elbows under your shoulders",
    }],
    form: &[BODY_LINE],
    family: StateFamily::Sustained,
    joint_rule: JointRule::FirstAvailable,
    counted: None,
};

/// Look up the definition for an exercise kind
pub fn definition(kind: ExerciseKind) -> &'static ExerciseDefinition {
    match kind {
        ExerciseKind::Pushup => &PUSHUP,
        ExerciseKind::Squat => &SQUAT,
        ExerciseKind::Lunges => &LUNGES,
        ExerciseKind::Plank => &PLANK,
    }
}

/// Every built-in definition
pub fn all() -> Vec<&'static ExerciseDefinition> {
    ExerciseKind::ALL.iter().map(|k| definition(*k)).collect()
}
