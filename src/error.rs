//! Error types for the quiz core and the leaderboard layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

/// Failures raised by the game core.
///
/// Grading never fails: a wrong or malformed answer is a plain `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown game mode: {0}")]
    UnknownMode(String),
}

/// Failures surfaced by the ranked store and leaderboard encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("ranked store error: {0}")]
    Store(String),

    #[error("invalid leaderboard entry: {0}")]
    InvalidEntry(String),

    #[error("undecodable leaderboard member: {0}")]
    Decode(String),
}
