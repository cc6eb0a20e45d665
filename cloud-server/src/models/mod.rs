//! Data models

pub mod user;
pub mod exercise_record;
pub mod challenge;
pub mod leaderboard;

pub use user::*;
pub use exercise_record::*;
pub use challenge::*;
pub use leaderboard::*;
