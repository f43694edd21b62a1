//! Core types: players, configuration, errors, RNG and the game state.
//!
//! This module holds plain data. Rules that move the game forward live in
//! `rules`; timing lives in `timing`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ControllerConfig, Difficulty, GameConfig, RevealPolicy, ThemeId, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{GameError, ResourceError, StateError, ValidationError};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, Phase, RevealedSet};
