//! Card identity and face state.

use serde::{Deserialize, Serialize};

/// Stable per-deck card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Visual identity of a card face (an image reference).
///
/// Exactly two cards in a deck share each `AssetRef`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    /// Create a new asset reference.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card on the board.
///
/// A matched card stays face-up for the rest of the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the deck.
    pub id: CardId,

    /// Face shared with exactly one other card.
    pub face: AssetRef,

    /// Currently face-up.
    pub is_flipped: bool,

    /// Permanently paired.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down card.
    pub fn new(id: CardId, face: AssetRef) -> Self {
        Self {
            id,
            face,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether this card and `other` form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.face == other.face
    }

    /// Whether a player may flip this card.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Turn face-down unless already matched.
    pub fn hide(&mut self) {
        if !self.is_matched {
            self.is_flipped = false;
        }
    }
}
