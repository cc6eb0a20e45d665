//! Geometry Module - keypoints and joint angles

pub mod keypoint;
pub mod angles;

pub use keypoint::{Keypoint, Landmark, Pose};
pub use angles::{compute_angle, compute_exercise_angles, is_pose_visible, joint_angle, validate_keypoints, FrameAngles};
