//! Game event types.
//!
//! Every observable state change leaves the controller as a `GameEvent`.
//! Payloads carry snapshots (cloned cards and players), never references
//! into live state.
//!
//! Serialized with an internal `type` tag using the camelCase event names
//! (`cardFlipped`, `turnSwitch`, ...).

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::Player;

/// Something that happened in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// The countdown started for the first time.
    GameStarted {
        current_player: Player,
        time_remaining: u32,
    },

    /// A card was turned face-up.
    CardFlipped { card: Card, player: Player },

    /// A revealed pair matched. `player` carries the updated counters.
    Match { cards: [Card; 2], player: Player },

    /// A revealed pair did not match; both cards are face-down again.
    Mismatch { cards: [Card; 2], player: Player },

    /// The turn passed from `previous` to `current`. The game is paused.
    TurnSwitch { previous: Player, current: Player },

    /// The countdown decremented.
    TimerTick { time_remaining: u32 },

    /// The countdown reached zero. `hidden` lists the cards turned back down.
    TimerExpired { player: Player, hidden: Vec<CardId> },

    /// The countdown was stopped by `pause_game`.
    GamePaused { time_remaining: u32 },

    /// The countdown was restarted by `resume_game`/`start_game`.
    GameResumed { time_remaining: u32 },

    /// Every pair is matched.
    ///
    /// `winner` is set only for a single winner; on a tie it is `None` and
    /// `winners` holds every player sharing the top score. `final_scores`
    /// is sorted by score, highest first.
    GameOver {
        winner: Option<Player>,
        winners: Vec<Player>,
        final_scores: Vec<Player>,
    },
}

impl GameEvent {
    /// Event name, matching the serialized `type` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "gameStarted",
            GameEvent::CardFlipped { .. } => "cardFlipped",
            GameEvent::Match { .. } => "match",
            GameEvent::Mismatch { .. } => "mismatch",
            GameEvent::TurnSwitch { .. } => "turnSwitch",
            GameEvent::TimerTick { .. } => "timerTick",
            GameEvent::TimerExpired { .. } => "timerExpired",
            GameEvent::GamePaused { .. } => "gamePaused",
            GameEvent::GameResumed { .. } => "gameResumed",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}
