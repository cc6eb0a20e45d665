//! Logic Module - rep counting engines
//!
//! - `geometry/` - keypoints and joint angles
//! - `exercise/` - data-driven exercise catalog
//! - `tracker/` - repetition state machine and scoring
//! - `session/` - capture lifetime, pose sources, session lifecycle
//! - `storage/` - local record persistence
//! - `cloud/` - record upload

pub mod geometry;
pub mod exercise;
pub mod tracker;
pub mod session;
pub mod storage;
pub mod cloud;
