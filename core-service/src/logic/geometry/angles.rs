//! Joint angle calculation
//!
//! Three-point planar angle at a vertex keypoint. No 3D reasoning,
//! no lens correction: the pose model's 2D output is used as-is.

use std::collections::BTreeMap;

use super::keypoint::{Keypoint, Landmark, Pose};
use crate::logic::exercise::{ExerciseDefinition, JointSpec};

/// Angle per joint name for one frame; `None` when not measurable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAngles(BTreeMap<&'static str, Option<f32>>);

impl FrameAngles {
    pub fn get(&self, joint: &str) -> Option<f32> {
        self.0.get(joint).copied().flatten()
    }

    pub fn insert(&mut self, joint: &'static str, angle: Option<f32>) {
        self.0.insert(joint, angle);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f32>)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Angle at `b` (degrees, 0 - 180) formed by `a` and `c`
///
/// Returns `None` if any keypoint is missing or below `threshold`.
pub fn compute_angle(
    a: Option<&Keypoint>,
    b: Option<&Keypoint>,
    c: Option<&Keypoint>,
    threshold: f32,
) -> Option<f32> {
    let (a, b, c) = (a?, b?, c?);
    if !(a.is_confident(threshold) && b.is_confident(threshold) && c.is_confident(threshold)) {
        return None;
    }

    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    Some(angle)
}

/// First measurable side of a joint, in fallback order
pub fn joint_angle(pose: &Pose, joint: &JointSpec, threshold: f32) -> Option<f32> {
    joint.sides.iter().find_map(|side| {
        compute_angle(
            pose.find(side.a),
            pose.find(side.vertex),
            pose.find(side.c),
            threshold,
        )
    })
}

/// Angles for every primary and form joint of an exercise
pub fn compute_exercise_angles(
    pose: &Pose,
    definition: &ExerciseDefinition,
    threshold: f32,
) -> FrameAngles {
    let mut angles = FrameAngles::default();
    for joint in definition.joints() {
        angles.insert(joint.name, joint_angle(pose, joint, threshold));
    }
    angles
}

/// Every required landmark present with `score >= threshold`
pub fn validate_keypoints(pose: &Pose, required: &[Landmark], threshold: f32) -> bool {
    required.iter().all(|landmark| {
        pose.find(*landmark)
            .map(|kp| kp.is_confident(threshold))
            .unwrap_or(false)
    })
}

/// Pose is usable for `definition`: every always-needed landmark is
/// confident and each primary joint has at least one confident side
pub fn is_pose_visible(pose: &Pose, definition: &ExerciseDefinition, threshold: f32) -> bool {
    validate_keypoints(pose, definition.required_keypoints, threshold)
        && definition.primary.iter().all(|joint| {
            joint
                .sides
                .iter()
                .any(|side| validate_keypoints(pose, &[side.a, side.vertex, side.c], threshold))
        })
}
