//! Deck building: difficulty + theme -> shuffled sequence of paired cards.
//!
//! ## Guarantees
//!
//! - Every face appears exactly twice
//! - Card IDs are unique and sequential (`0..total_cards`) before shuffling
//! - The order is a uniform Fisher-Yates shuffle driven by `GameRng`
//!
//! Building is all-or-nothing: if the provider cannot supply enough distinct
//! faces, no deck is produced.

use rustc_hash::{FxHashMap, FxHashSet};

use super::assets::AssetProvider;
use super::card::{AssetRef, Card, CardId};
use crate::core::{Difficulty, GameRng, ResourceError, ThemeId};

/// Builds shuffled decks.
///
/// ## Example
///
/// ```
/// use rust_pairs::cards::{DeckBuilder, ThemeCatalog};
/// use rust_pairs::core::{Difficulty, GameRng, ThemeId};
///
/// let mut catalog = ThemeCatalog::new();
/// let mut rng = GameRng::new(42);
///
/// let deck = DeckBuilder::new(Difficulty::Easy, ThemeId::new("animals"))
///     .build(&mut catalog, &mut rng)
///     .unwrap();
/// assert_eq!(deck.len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    difficulty: Difficulty,
    theme: ThemeId,
}

impl DeckBuilder {
    /// Create a builder for a difficulty and theme.
    pub fn new(difficulty: Difficulty, theme: ThemeId) -> Self {
        Self { difficulty, theme }
    }

    /// Fetch faces, pair them up and shuffle.
    pub fn build(
        &self,
        provider: &mut dyn AssetProvider,
        rng: &mut GameRng,
    ) -> Result<Vec<Card>, ResourceError> {
        let wanted = self.difficulty.unique_count();
        let faces = self.fetch_faces(provider, wanted)?;

        let mut cards: Vec<Card> = faces
            .iter()
            .flat_map(|face| [face.clone(), face.clone()])
            .enumerate()
            .map(|(i, face)| Card::new(CardId::new(i as u32), face))
            .collect();

        rng.shuffle(&mut cards);

        tracing::debug!(
            difficulty = %self.difficulty,
            theme = %self.theme,
            cards = cards.len(),
            "Dealt deck"
        );

        Ok(cards)
    }

    /// Ask the provider for `wanted` faces and keep the first `wanted`
    /// distinct ones. Fails on shortage.
    fn fetch_faces(
        &self,
        provider: &mut dyn AssetProvider,
        wanted: usize,
    ) -> Result<Vec<AssetRef>, ResourceError> {
        let supplied = provider.unique_assets(&self.theme, wanted)?;

        let mut seen = FxHashSet::default();
        let faces: Vec<AssetRef> = supplied
            .into_iter()
            .filter(|face| seen.insert(face.clone()))
            .take(wanted)
            .collect();

        if faces.len() < wanted {
            return Err(ResourceError::NotEnoughAssets {
                theme: self.theme.clone(),
                requested: wanted,
                available: faces.len(),
            });
        }

        Ok(faces)
    }
}

/// Check the pair invariant: every face appears exactly twice and no two
/// cards share an ID.
#[must_use]
pub fn is_well_paired(cards: &[Card]) -> bool {
    let mut ids = FxHashSet::default();
    if !cards.iter().all(|card| ids.insert(card.id)) {
        return false;
    }

    let mut counts: FxHashMap<&AssetRef, usize> = FxHashMap::default();
    for card in cards {
        *counts.entry(&card.face).or_default() += 1;
    }
    counts.values().all(|&n| n == 2)
}
