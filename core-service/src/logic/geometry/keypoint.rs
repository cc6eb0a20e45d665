//! Keypoint types produced by the pose model

use serde::{Deserialize, Serialize};

/// The 17 MoveNet / COCO body landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    pub const COUNT: usize = 17;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl std::fmt::Display for Landmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single detected keypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: Landmark,
    pub x: f32,
    pub y: f32,
    /// Detection confidence (0.0 - 1.0)
    pub score: f32,
}

impl Keypoint {
    pub fn new(name: Landmark, x: f32, y: f32, score: f32) -> Self {
        Self { name, x, y, score }
    }

    /// Score reaches the threshold
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.score >= threshold
    }
}

/// All keypoints detected for one person in one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Find a keypoint by label
    pub fn find(&self, landmark: Landmark) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == landmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_wire_names() {
        let kp: Keypoint = serde_json::from_str(
            r#"{"name":"left_elbow","x":1.0,"y":2.0,"score":0.9}"#
        ).unwrap();
        assert_eq!(kp.name, Landmark::LeftElbow);
        assert_eq!(kp.name.to_string(), "left_elbow");
    }

    #[test]
    fn test_unknown_landmark_rejected() {
        let result: Result<Keypoint, _> = serde_json::from_str(
            r#"{"name":"left_thumb","x":1.0,"y":2.0,"score":0.9}"#
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_pose_find() {
        let pose = Pose::new(vec![
            Keypoint::new(Landmark::Nose, 0.0, 0.0, 0.8),
            Keypoint::new(Landmark::LeftKnee, 5.0, 5.0, 0.6),
        ]);
        assert_eq!(pose.find(Landmark::LeftKnee).map(|k| k.x), Some(5.0));
        assert!(pose.find(Landmark::RightKnee).is_none());
    }
}
