//! Flip validation and pair resolution.
//!
//! `reveal` turns a single card face-up for the active player.
//! `resolve_pair` decides a revealed pair once its comparison delay has
//! elapsed. Both operate directly on `GameState`; timing and event
//! emission are the controller's job.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::GameState;
use crate::timing::PendingComparison;

/// Immediate answer to a flip request.
///
/// The second flip of a pair also answers `FirstCard`: the comparison
/// outcome arrives later as a `match`/`mismatch` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipResult {
    /// The flip was accepted.
    FirstCard,
    /// The flip was refused; nothing changed.
    Invalid(FlipRejection),
    /// The game has ended.
    GameOver,
}

/// Why a flip was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipRejection {
    NotInitialized,
    Paused,
    UnknownCard,
    AlreadyMatched,
    AlreadyFlipped,
    /// Two cards are already face-up awaiting comparison.
    PairPending,
}

impl std::fmt::Display for FlipRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            FlipRejection::NotInitialized => "no game initialized",
            FlipRejection::Paused => "game is paused",
            FlipRejection::UnknownCard => "unknown card",
            FlipRejection::AlreadyMatched => "card already matched",
            FlipRejection::AlreadyFlipped => "card already face-up",
            FlipRejection::PairPending => "two cards already revealed",
        };
        f.write_str(reason)
    }
}

/// Check whether `id` may be flipped right now (game known to be live).
pub fn check_flip(state: &GameState, id: CardId) -> Result<(), FlipRejection> {
    if state.is_paused() {
        return Err(FlipRejection::Paused);
    }
    let card = state.card(id).ok_or(FlipRejection::UnknownCard)?;
    if card.is_matched {
        return Err(FlipRejection::AlreadyMatched);
    }
    if card.is_flipped {
        return Err(FlipRejection::AlreadyFlipped);
    }
    if state.revealed().len() >= 2 {
        return Err(FlipRejection::PairPending);
    }
    Ok(())
}

/// Turn a card face-up for the active player and count the flip.
///
/// Returns the flipped card. Call `check_flip` first.
pub fn reveal(state: &mut GameState, id: CardId) -> Option<Card> {
    let card = state.card_mut(id)?;
    card.is_flipped = true;
    let card = card.clone();

    state.revealed.push(id);
    let active = state.current_player;
    state.players[active].total_flips += 1;

    Some(card)
}

/// Outcome of comparing a revealed pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    /// Faces equal: both cards are matched, the player's counters updated.
    Matched([Card; 2]),
    /// Faces differ: both cards are face-down again.
    Mismatched([Card; 2]),
    /// The pair no longer stands (cards hidden by expiry, game replaced).
    Stale,
}

/// Compare a revealed pair and apply the result.
///
/// The pair is removed from the revealed set if still present. Credit goes
/// to the player who revealed it.
pub fn resolve_pair(state: &mut GameState, pending: &PendingComparison) -> PairOutcome {
    let (first, second) = match (state.card(pending.first), state.card(pending.second)) {
        (Some(a), Some(b)) => (a.clone(), b.clone()),
        _ => return PairOutcome::Stale,
    };

    state
        .revealed
        .retain(|id| *id != pending.first && *id != pending.second);

    let is_live = |c: &Card| c.is_flipped && !c.is_matched;
    if !is_live(&first) || !is_live(&second) {
        return PairOutcome::Stale;
    }

    if first.pairs_with(&second) {
        let mut cards = [first, second];
        for card in &mut cards {
            card.is_matched = true;
            if let Some(live) = state.card_mut(card.id) {
                live.is_matched = true;
                live.is_flipped = true;
            }
        }

        let player = &mut state.players[pending.player];
        player.matches += 1;
        player.recompute_score();

        PairOutcome::Matched(cards)
    } else {
        let mut cards = [first, second];
        for card in &mut cards {
            card.is_flipped = false;
            if let Some(live) = state.card_mut(card.id) {
                live.hide();
            }
        }
        PairOutcome::Mismatched(cards)
    }
}

/// Turn every revealed card back down and clear the revealed set.
///
/// Neither a match nor a flip is counted. Returns the hidden card IDs.
pub fn hide_revealed(state: &mut GameState) -> Vec<CardId> {
    let revealed: Vec<CardId> = state.revealed.drain(..).collect();
    for id in &revealed {
        if let Some(card) = state.card_mut(*id) {
            card.hide();
        }
    }
    revealed
}
