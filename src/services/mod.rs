//! External collaborators at their interface boundary.
//!
//! - [`SnapshotStore`]: Opaque blob store for saved games
//! - [`Leaderboard`]: Accepts finished-game records, returns top-N
//!
//! Both are best-effort from the controller's point of view: their
//! failures never change game state.

mod leaderboard;
mod persistence;

pub use leaderboard::{submit_final_scores, InMemoryLeaderboard, Leaderboard, RecordId, ScoreRecord};
pub use persistence::{MemoryStore, SnapshotStore};
