use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_pairs::core::{Difficulty, GameConfig, GameRng};
use rust_pairs::{CardId, ControllerConfig, DeckBuilder, GameController, ManualClock, ThemeCatalog, ThemeId};

fn bench_deal(c: &mut Criterion) {
    let mut catalog = ThemeCatalog::new();
    let mut rng = GameRng::new(12345);
    let builder = DeckBuilder::new(Difficulty::Hard, ThemeId::new("animals"));

    c.bench_function("deal_hard_deck", |b| {
        b.iter(|| black_box(builder.build(&mut catalog, &mut rng)))
    });
}

fn pairs(controller: &GameController) -> Vec<(CardId, CardId)> {
    let Some(state) = controller.game_state() else {
        return Vec::new();
    };
    let cards: Vec<_> = state.cards().iter().cloned().collect();
    let mut out = Vec::new();
    for (i, a) in cards.iter().enumerate() {
        if let Some(b) = cards[i + 1..].iter().find(|b| b.face == a.face) {
            out.push((a.id, b.id));
        }
    }
    out
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("scripted_medium_game", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let mut controller = GameController::with_clock(
                ControllerConfig::default().with_seed(7),
                ThemeCatalog::new(),
                clock.clone(),
            );
            controller
                .init_game(GameConfig::new(Difficulty::Medium, "fruits").with_players(["Ada", "Bob"]))
                .ok();
            controller.start_game().ok();

            for (a, b) in pairs(&controller) {
                controller.flip_card(a);
                controller.flip_card(b);
                clock.advance(1000);
                controller.poll();
            }
            black_box(controller.phase())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut controller = GameController::with_clock(
        ControllerConfig::default().with_seed(7),
        ThemeCatalog::new(),
        ManualClock::new(),
    );
    controller
        .init_game(GameConfig::new(Difficulty::Hard, "animals").with_player("Ada"))
        .ok();

    c.bench_function("game_state_snapshot", |b| b.iter(|| black_box(controller.game_state())));
}

criterion_group!(benches, bench_deal, bench_full_game, bench_snapshot);
criterion_main!(benches);
