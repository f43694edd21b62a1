//! # rust-pairs
//!
//! A turn-based matching-card (pairs) game engine: N players take turns
//! flipping cards two at a time, matched pairs score accuracy points and a
//! per-turn countdown keeps play moving.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: `GameController` exclusively owns the `GameState`.
//!    Callers receive snapshots and drive the game through its operations.
//!
//! 2. **Virtual Time**: Delayed effects are scheduled on a single ordered
//!    timeline against an injectable `Clock`. Nothing runs concurrently and
//!    tests advance time deterministically.
//!
//! 3. **Events Out**: Every observable change leaves the controller as a
//!    `GameEvent`, the sole feed for presentation and persistence layers.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The deck is an `im::Vector`, so
//!   snapshots are O(1) clones.
//!
//! - **Generations**: Every scheduled task carries the generation of the game
//!   that queued it; tasks from a replaced or destroyed game never fire.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, errors, RNG, game state
//! - `cards`: Cards, asset providers, deck building
//! - `rules`: Flip validation, pair resolution, turn sequencing, scoring
//! - `timing`: Clock, timeline, turn countdown
//! - `events`: Game events and the observer bus
//! - `controller`: The orchestrator
//! - `services`: Snapshot store and leaderboard collaborators

pub mod cards;
pub mod controller;
pub mod core;
pub mod events;
pub mod rules;
pub mod services;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{
    ControllerConfig, Difficulty, GameConfig, RevealPolicy, ThemeId,
    GameError, ResourceError, StateError, ValidationError,
    GameRng, GameState, Phase, Player, PlayerId, PlayerMap,
};

pub use crate::cards::{AssetProvider, AssetRef, CachedAssets, Card, CardId, DeckBuilder, ThemeCatalog};

pub use crate::rules::{score, FlipRejection, FlipResult, GameResult};

pub use crate::timing::{Clock, ManualClock, SystemClock};

pub use crate::events::{EventBus, EventLog, GameEvent, ListenerId};

pub use crate::controller::GameController;

pub use crate::services::{
    submit_final_scores, InMemoryLeaderboard, Leaderboard, MemoryStore, RecordId, ScoreRecord,
    SnapshotStore,
};
