//! Game state aggregate.
//!
//! ## GameState
//!
//! - Configuration the game was dealt from
//! - The deck, in board order (`im::Vector`, O(1) clone)
//! - Players with their counters and the active flag
//! - Current player, revealed set, countdown
//! - Lifecycle flags and, once finished, the result
//!
//! The controller owns the only mutable instance. Everything handed out is
//! a clone, so callers can hold snapshots freely without affecting play.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::GameConfig;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{Card, CardId};
use crate::rules::GameResult;
use crate::timing::TurnTimer;

/// Face-up, unmatched cards awaiting comparison (0-2 entries).
pub type RevealedSet = SmallVec<[CardId; 2]>;

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Dealt, countdown not yet started.
    Initialized,
    /// Countdown running, flips accepted.
    Running,
    /// Countdown stopped (by request or between turns).
    Paused,
    /// Every pair matched. Terminal.
    GameOver,
}

/// Complete state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) cards: Vector<Card>,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) current_player: PlayerId,
    pub(crate) revealed: RevealedSet,
    pub(crate) timer: TurnTimer,
    pub(crate) started: bool,
    pub(crate) is_paused: bool,
    pub(crate) is_game_over: bool,
    pub(crate) result: Option<GameResult>,

    /// Card ID -> board position. Rebuilt by `reindex` after deserializing.
    #[serde(skip)]
    index: FxHashMap<CardId, usize>,
}

impl GameState {
    /// Seat the players and lay out the deck.
    ///
    /// Player 0 is active, counters are zero, the game is paused and not started.
    pub(crate) fn new(config: GameConfig, cards: Vec<Card>, timer: TurnTimer) -> Self {
        let mut players = PlayerMap::new(config.players.len(), |id| {
            Player::new(id, config.players[id.index()].clone())
        });
        players[PlayerId::new(0)].is_active = true;

        let mut state = Self {
            config,
            cards: cards.into_iter().collect(),
            players,
            current_player: PlayerId::new(0),
            revealed: RevealedSet::new(),
            timer,
            started: false,
            is_paused: true,
            is_game_over: false,
            result: None,
            index: FxHashMap::default(),
        };
        state.reindex();
        state
    }

    /// Rebuild the card index from the deck order.
    pub(crate) fn reindex(&mut self) {
        self.index = self
            .cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.id, pos))
            .collect();
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.index
            .get(&id)
            .copied()
            .or_else(|| self.cards.iter().position(|c| c.id == id))
    }

    // === Configuration ===

    /// The configuration this game was dealt from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Cards ===

    /// The deck in board order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.position(id).and_then(|pos| self.cards.get(pos))
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let pos = self.position(id)?;
        self.cards.get_mut(pos)
    }

    /// Cards currently face-up and awaiting comparison.
    #[must_use]
    pub fn revealed(&self) -> &[CardId] {
        &self.revealed
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count() / 2
    }

    /// Whether every card is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|c| c.is_matched)
    }

    // === Players ===

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// A player by seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Seat of the active player.
    #[must_use]
    pub fn current_player_index(&self) -> PlayerId {
        self.current_player
    }

    /// The active player.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    // === Countdown ===

    /// Seconds left in the current turn.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    /// Full turn length in seconds.
    #[must_use]
    pub fn turn_duration(&self) -> u32 {
        self.timer.duration()
    }

    // === Lifecycle ===

    /// Whether the countdown is stopped.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Whether every pair has been found.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_game_over {
            Phase::GameOver
        } else if !self.started {
            Phase::Initialized
        } else if self.is_paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Final result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// The single winner. `None` before the end and on a tie.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        match &self.result {
            Some(GameResult::Winner(id)) => Some(&self.players[*id]),
            _ => None,
        }
    }

    /// Every player sharing the top score once the game is over.
    #[must_use]
    pub fn winners(&self) -> Vec<&Player> {
        self.result
            .as_ref()
            .map(|r| r.winners().into_iter().map(|id| &self.players[id]).collect())
            .unwrap_or_default()
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.cards == other.cards
            && self.players == other.players
            && self.current_player == other.current_player
            && self.revealed == other.revealed
            && self.timer.remaining() == other.timer.remaining()
            && self.timer.duration() == other.timer.duration()
            && self.started == other.started
            && self.is_paused == other.is_paused
            && self.is_game_over == other.is_game_over
            && self.result == other.result
    }
}

impl Eq for GameState {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::AssetRef;
    use crate::core::Difficulty;

    fn state(players: &[&str]) -> GameState {
        let config = GameConfig::new(Difficulty::Easy, "test").with_players(players.iter().copied());
        let cards = ["a", "b", "a", "b"]
            .iter()
            .enumerate()
            .map(|(i, f)| Card::new(CardId::new(i as u32 * 10), AssetRef::new(*f)))
            .collect();
        GameState::new(config, cards, TurnTimer::new(30, 1000))
    }

    #[test]
    fn test_new_state() {
        let state = state(&["Ada", "Bob"]);

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player_index(), PlayerId::new(0));
        assert!(state.player(PlayerId::new(0)).is_active);
        assert!(!state.player(PlayerId::new(1)).is_active);
        assert!(state.revealed().is_empty());
        assert_eq!(state.time_remaining(), 30);
        assert_eq!(state.phase(), Phase::Initialized);
        assert!(state.winner().is_none());
        assert!(state.winners().is_empty());
    }

    #[test]
    fn test_card_lookup() {
        let mut state = state(&["Ada"]);

        assert_eq!(state.card(CardId::new(20)).unwrap().face, AssetRef::new("a"));
        assert!(state.card(CardId::new(5)).is_none());

        state.card_mut(CardId::new(30)).unwrap().is_flipped = true;
        assert!(state.cards()[3].is_flipped);
    }

    #[test]
    fn test_lookup_without_index() {
        let state = state(&["Ada"]);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.card(CardId::new(10)).unwrap().face, AssetRef::new("b"));
        assert_eq!(restored, state);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = state(&["Ada"]);
        let snapshot = state.clone();

        state.card_mut(CardId::new(0)).unwrap().is_flipped = true;

        assert!(!snapshot.card(CardId::new(0)).unwrap().is_flipped);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = state(&["Ada"]);
        state.started = true;
        assert_eq!(state.phase(), Phase::Paused);

        state.is_paused = false;
        assert_eq!(state.phase(), Phase::Running);

        state.is_game_over = true;
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_matched_pairs() {
        let mut state = state(&["Ada"]);
        assert_eq!(state.matched_pairs(), 0);
        assert!(!state.all_matched());

        for id in [0, 20] {
            let card = state.card_mut(CardId::new(id)).unwrap();
            card.is_flipped = true;
            card.is_matched = true;
        }
        assert_eq!(state.matched_pairs(), 1);
    }
}
