//! Player identification, per-player data storage, and player records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. A game seats 1-4 players.
//!
//! ## PlayerMap
//!
//! One value per seat, indexed by `PlayerId`. The game keeps its `Player`
//! records here in turn order.
//!
//! ## Player
//!
//! A seated player: display name, flip/match counters, derived score and
//! the active flag. Only the controller mutates players.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::rules::scoring;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next player in seating order, wrapping around.
    ///
    /// ```
    /// use rust_pairs::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Every seat of a `player_count`-player game, in turn order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(|seat| PlayerId(seat as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use rust_pairs::core::{PlayerId, PlayerMap};
///
/// let mut flips = PlayerMap::new(2, |_| 0u32);
/// flips[PlayerId::new(1)] += 2;
/// assert_eq!(flips.get(PlayerId::new(1)), Some(&2));
/// assert_eq!(flips.get(PlayerId::new(2)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill every seat from `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            seats: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Value for a seat, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }

    /// Mutable values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.seats.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Cards flipped face-up by this player.
    pub total_flips: u32,

    /// Pairs found by this player.
    pub matches: u32,

    /// Accuracy score, derived from the two counters.
    pub score: u32,

    /// Whether this player is the one allowed to flip.
    pub is_active: bool,
}

impl Player {
    /// Seat a player with zeroed counters.
    ///
    /// Blank names fall back to "Player N" (1-based).
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            format!("Player {}", id.index() + 1)
        } else {
            name.trim().to_string()
        };

        Self {
            id,
            name,
            total_flips: 0,
            matches: 0,
            score: 0,
            is_active: false,
        }
    }

    /// Recompute `score` from the counters. Idempotent.
    pub fn recompute_score(&mut self) -> u32 {
        self.score = scoring::score(self.matches, self.total_flips);
        self.score
    }
}
