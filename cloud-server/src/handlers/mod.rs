//! HTTP handlers

pub mod health;
pub mod users;
pub mod exercises;
pub mod challenges;
pub mod leaderboard;
