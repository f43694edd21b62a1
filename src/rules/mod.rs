//! Game rules: flip validation, pair resolution, turn sequencing, scoring
//! and game-over resolution.
//!
//! Every function here is a synchronous transformation of `GameState`.
//! Scheduling and event emission belong to the controller, which decides
//! when each rule runs.

pub mod outcome;
pub mod resolver;
pub mod scoring;
pub mod sequencer;

pub use outcome::{finish, rank, GameResult, Standings};
pub use resolver::{check_flip, hide_revealed, resolve_pair, reveal, FlipRejection, FlipResult, PairOutcome};
pub use scoring::score;
pub use sequencer::{hand_off, set_active, TurnChange};
