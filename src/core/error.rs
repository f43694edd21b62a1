//! Error taxonomy.
//!
//! - `ValidationError`: bad configuration or malformed input
//! - `StateError`: operation not allowed in the current lifecycle state
//! - `ResourceError`: a collaborator (assets, persistence, leaderboard) failed
//!
//! Validation and state errors are returned synchronously and never retried.
//! A resource error during `init_game` aborts initialization entirely.

use super::config::ThemeId;

/// Top-level engine error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid state: {0}")]
    State(#[from] StateError),

    #[error("resource unavailable: {0}")]
    Resource(#[from] ResourceError),
}

/// Bad configuration or request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("player count must be 1-4, got {count}")]
    PlayerCount { count: usize },

    #[error("turn duration must be at least one second")]
    TurnDuration,

    #[error("tick interval must be greater than zero")]
    TickInterval,

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Operation invalid in the current lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("no game has been initialized")]
    NotInitialized,

    #[error("the game is over")]
    GameOver,
}

/// Collaborator failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("unknown theme '{0}'")]
    UnknownTheme(ThemeId),

    #[error("theme '{theme}' has {available} unique assets, {requested} requested")]
    NotEnoughAssets {
        theme: ThemeId,
        requested: usize,
        available: usize,
    },

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("leaderboard failed: {0}")]
    Leaderboard(String),

    #[error("snapshot codec failed: {0}")]
    Codec(String),
}

impl From<bincode::Error> for ResourceError {
    fn from(err: bincode::Error) -> Self {
        ResourceError::Codec(err.to_string())
    }
}
