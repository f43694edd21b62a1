//! Game-over resolution.
//!
//! When every card is matched the game ends: the countdown stops, every
//! score is recomputed from its counters, players are ranked by score and
//! the top score decides the result. Several players sharing the top score
//! is a tie.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Player, PlayerId};
use crate::timing::Timeline;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players share the top score.
    Tie(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won or shares the win.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Tie(ps) => ps.contains(&player),
        }
    }

    /// Every player holding the top score.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Tie(ps) => ps.clone(),
        }
    }

    /// Whether the top score is shared.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        matches!(self, GameResult::Tie(_))
    }
}

/// Final ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    pub result: GameResult,
    /// Players sorted by score, highest first. Equal scores keep seat order.
    pub final_scores: Vec<Player>,
}

impl Standings {
    /// The single winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        match &self.result {
            GameResult::Winner(id) => self.final_scores.iter().find(|p| p.id == *id),
            GameResult::Tie(_) => None,
        }
    }

    /// Every player holding the top score.
    #[must_use]
    pub fn winners(&self) -> Vec<Player> {
        self.final_scores
            .iter()
            .filter(|p| self.result.is_winner(p.id))
            .cloned()
            .collect()
    }
}

/// Rank players by score.
///
/// Scores are recomputed from the counters first.
pub fn rank(players: impl IntoIterator<Item = Player>) -> Standings {
    let mut final_scores: Vec<Player> = players
        .into_iter()
        .map(|mut p| {
            p.recompute_score();
            p
        })
        .collect();
    final_scores.sort_by(|a, b| b.score.cmp(&a.score));

    let top = final_scores.first().map(|p| p.score).unwrap_or(0);
    let leaders: Vec<PlayerId> = final_scores
        .iter()
        .take_while(|p| p.score == top)
        .map(|p| p.id)
        .collect();

    let result = match leaders.as_slice() {
        [single] => GameResult::Winner(*single),
        _ => GameResult::Tie(leaders),
    };

    Standings {
        result,
        final_scores,
    }
}

/// End the game: stop the countdown, recompute scores, record the result.
pub fn finish(state: &mut GameState, timeline: &mut Timeline) -> Standings {
    state.timer.stop(timeline);
    state.is_game_over = true;

    for player in state.players.values_mut() {
        player.recompute_score();
    }

    let standings = rank(state.players.values().cloned());
    state.result = Some(standings.result.clone());

    tracing::info!(
        result = ?standings.result,
        top_score = standings.final_scores.first().map(|p| p.score),
        "Game over"
    );

    standings
}
