//! Turn sequencing.
//!
//! Exactly one player is active at any non-terminal moment. Handing off
//! hides whatever the outgoing player left face-up, moves the turn to the
//! next seat, restores the full countdown and pauses the game so the next
//! player can confirm before their clock runs.

use crate::cards::CardId;
use crate::core::{GameState, Player, PlayerId};
use crate::rules::resolver::hide_revealed;
use crate::timing::Timeline;

/// A completed hand-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnChange {
    pub previous: Player,
    pub current: Player,
    /// Cards the outgoing player left face-up, now hidden again.
    pub hidden: Vec<CardId>,
}

/// Make `player` the only active player.
pub fn set_active(state: &mut GameState, player: PlayerId) {
    state.current_player = player;
    for p in state.players.values_mut() {
        p.is_active = p.id == player;
    }
}

/// Pass the turn to `(current + 1) mod player_count`.
///
/// Every turn starts with an empty revealed set. Stops and resets the
/// countdown and leaves the game paused.
pub fn hand_off(state: &mut GameState, timeline: &mut Timeline) -> TurnChange {
    let hidden = hide_revealed(state);
    let previous = state.current_player;
    let next = previous.next(state.player_count());
    set_active(state, next);

    state.timer.stop(timeline);
    state.timer.reset();
    state.is_paused = true;

    tracing::info!(from = %previous, to = %next, "Turn switch");

    TurnChange {
        previous: state.players[previous].clone(),
        current: state.players[next].clone(),
        hidden,
    }
}
