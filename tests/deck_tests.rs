//! Deck building tests.
//!
//! Property tests check the pair invariant for every difficulty and seed;
//! the rest cover provider failures and caching.

use proptest::prelude::*;

use rust_pairs::cards::is_well_paired;
use rust_pairs::core::{Difficulty, GameConfig, GameRng};
use rust_pairs::{
    AssetProvider, AssetRef, CachedAssets, ControllerConfig, DeckBuilder, GameController,
    GameError, ManualClock, ResourceError, ThemeCatalog, ThemeId,
};

fn deal(difficulty: Difficulty, theme: &str, seed: u64) -> Vec<rust_pairs::Card> {
    DeckBuilder::new(difficulty, ThemeId::new(theme))
        .build(&mut ThemeCatalog::new(), &mut GameRng::new(seed))
        .unwrap()
}

proptest! {
    #[test]
    fn prop_deck_is_well_paired(
        seed in any::<u64>(),
        difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
    ) {
        let deck = deal(difficulty, "animals", seed);

        prop_assert_eq!(deck.len(), difficulty.total_cards());
        prop_assert!(is_well_paired(&deck));
        prop_assert!(deck.iter().all(|c| c.is_hidden()));

        let mut ids: Vec<u32> = deck.iter().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..difficulty.total_cards() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn prop_same_seed_same_deck(seed in any::<u64>()) {
        prop_assert_eq!(
            deal(Difficulty::Medium, "fruits", seed),
            deal(Difficulty::Medium, "fruits", seed)
        );
    }
}

#[test]
fn test_every_face_appears_twice_after_init() {
    for difficulty in Difficulty::ALL {
        let mut controller = GameController::with_clock(
            ControllerConfig::default().with_seed(11),
            ThemeCatalog::new(),
            ManualClock::new(),
        );
        controller
            .init_game(GameConfig::new(difficulty, "animals").with_player("Ada"))
            .unwrap();

        let state = controller.game_state().unwrap();
        let cards: Vec<_> = state.cards().iter().cloned().collect();
        assert_eq!(cards.len(), difficulty.total_cards());
        for card in &cards {
            assert_eq!(cards.iter().filter(|c| c.face == card.face).count(), 2);
        }
    }
}

#[test]
fn test_seeds_change_order() {
    let a = deal(Difficulty::Hard, "animals", 1);
    let b = deal(Difficulty::Hard, "animals", 2);

    assert_ne!(a, b);
    assert!(is_well_paired(&a) && is_well_paired(&b));
}

#[test]
fn test_shortage_fails_init() {
    let mut controller =
        GameController::with_clock(ControllerConfig::default(), ThemeCatalog::new(), ManualClock::new());

    let err = controller
        .init_game(GameConfig::new(Difficulty::Hard, "space").with_player("Ada"))
        .unwrap_err();
    assert_eq!(
        err,
        GameError::Resource(ResourceError::NotEnoughAssets {
            theme: ThemeId::new("space"),
            requested: 12,
            available: 8,
        })
    );

    let err = controller
        .init_game(GameConfig::new(Difficulty::Easy, "cars").with_player("Ada"))
        .unwrap_err();
    assert_eq!(err, GameError::Resource(ResourceError::UnknownTheme(ThemeId::new("cars"))));
    assert!(controller.game_state().is_none());
}

/// Provider that repeats its first face.
struct Repetitive;

impl AssetProvider for Repetitive {
    fn unique_assets(&mut self, _theme: &ThemeId, count: usize) -> Result<Vec<AssetRef>, ResourceError> {
        Ok(vec![AssetRef::new("same"); count])
    }
}

#[test]
fn test_duplicate_faces_count_as_shortage() {
    let err = DeckBuilder::new(Difficulty::Easy, ThemeId::new("any"))
        .build(&mut Repetitive, &mut GameRng::new(0))
        .unwrap_err();

    assert_eq!(
        err,
        ResourceError::NotEnoughAssets {
            theme: ThemeId::new("any"),
            requested: 4,
            available: 1,
        }
    );
}

#[test]
fn test_cached_assets_reuse_answers() {
    let mut assets = CachedAssets::new(ThemeCatalog::new());
    let mut rng = GameRng::new(5);
    let builder = DeckBuilder::new(Difficulty::Easy, ThemeId::new("animals"));

    let first = builder.build(&mut assets, &mut rng).unwrap();
    let second = builder.build(&mut assets, &mut rng).unwrap();

    assert_eq!(assets.misses(), 1);
    assert!(is_well_paired(&first) && is_well_paired(&second));

    let failed = DeckBuilder::new(Difficulty::Hard, ThemeId::new("space")).build(&mut assets, &mut rng);
    assert!(failed.is_err());
    let failed = DeckBuilder::new(Difficulty::Hard, ThemeId::new("space")).build(&mut assets, &mut rng);
    assert!(failed.is_err());
    assert_eq!(assets.misses(), 3);
}
