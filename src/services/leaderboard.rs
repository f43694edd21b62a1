//! Leaderboard collaborator.
//!
//! One `ScoreRecord` per player per finished game. Submission is best
//! effort: `submit_final_scores` logs failures and carries on.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameState, ResourceError, ThemeId};

/// Identifier assigned by the leaderboard to an accepted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

/// A finished game's result for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub matches: u32,
    pub total_flips: u32,
    pub difficulty: Difficulty,
    pub theme: ThemeId,
    /// Whether this player won or shared the win.
    pub won: bool,
}

/// Ranked score storage.
pub trait Leaderboard {
    /// Store a record.
    fn submit(&mut self, record: ScoreRecord) -> Result<RecordId, ResourceError>;

    /// Up to `limit` records, best score first.
    fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>, ResourceError>;
}

/// In-process leaderboard.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLeaderboard {
    records: Vec<(RecordId, ScoreRecord)>,
    next_id: u64,
}

impl InMemoryLeaderboard {
    /// Create an empty leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn submit(&mut self, record: ScoreRecord) -> Result<RecordId, ResourceError> {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push((id, record));
        Ok(id)
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>, ResourceError> {
        let mut ranked: Vec<&(RecordId, ScoreRecord)> = self.records.iter().collect();
        // Best score first; earlier submissions win ties.
        ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.0.cmp(&b.0)));
        Ok(ranked.into_iter().take(limit).map(|(_, r)| r.clone()).collect())
    }
}

/// Submit every player's final result. Returns the accepted record IDs.
///
/// Does nothing before the game is over. Failed submissions are logged and
/// skipped.
pub fn submit_final_scores(leaderboard: &mut dyn Leaderboard, state: &GameState) -> Vec<RecordId> {
    let Some(result) = state.result() else {
        tracing::debug!("Game not finished, nothing to submit");
        return Vec::new();
    };

    let config = state.config();
    state
        .players()
        .values()
        .filter_map(|player| {
            let record = ScoreRecord {
                name: player.name.clone(),
                score: player.score,
                matches: player.matches,
                total_flips: player.total_flips,
                difficulty: config.difficulty,
                theme: config.theme.clone(),
                won: result.is_winner(player.id),
            };
            match leaderboard.submit(record) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(player = %player.name, error = %e, "Leaderboard submission failed");
                    None
                }
            }
        })
        .collect()
}
