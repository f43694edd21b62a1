//! Controller lifecycle and flip handling tests.
//!
//! Time is virtual: every test drives a `ManualClock` and polls, so the
//! comparison delay and countdown ticks fire deterministically.

use rust_pairs::core::{Difficulty, GameConfig, Phase, PlayerId};
use rust_pairs::{
    CardId, ControllerConfig, EventLog, FlipRejection, FlipResult, GameController, GameError,
    GameEvent, ManualClock, RevealPolicy, StateError, ThemeCatalog, ValidationError,
};

fn setup(config: ControllerConfig, players: &[&str]) -> (GameController, ManualClock, EventLog) {
    let clock = ManualClock::new();
    let mut controller =
        GameController::with_clock(config.with_seed(42), ThemeCatalog::new(), clock.clone());
    let log = EventLog::new();
    controller.subscribe(log.listener());
    controller
        .init_game(GameConfig::new(Difficulty::Easy, "animals").with_players(players.iter().copied()))
        .unwrap();
    (controller, clock, log)
}

/// Pairs of card IDs sharing a face, in board order of their first card.
fn pairs(controller: &GameController) -> Vec<(CardId, CardId)> {
    let state = controller.game_state().unwrap();
    let cards: Vec<_> = state.cards().iter().cloned().collect();
    let mut out = Vec::new();
    for (i, a) in cards.iter().enumerate() {
        if let Some(b) = cards[i + 1..].iter().find(|b| b.face == a.face) {
            out.push((a.id, b.id));
        }
    }
    out
}

fn is_flipped(controller: &GameController, id: CardId) -> bool {
    controller.game_state().unwrap().card(id).unwrap().is_flipped
}

fn play_pair(controller: &mut GameController, clock: &ManualClock, a: CardId, b: CardId) {
    assert_eq!(controller.flip_card(a), FlipResult::FirstCard);
    assert_eq!(controller.flip_card(b), FlipResult::FirstCard);
    clock.advance(1000);
    controller.poll();
}

#[test]
fn test_operations_before_init() {
    let mut controller =
        GameController::with_clock(ControllerConfig::default(), ThemeCatalog::new(), ManualClock::new());
    let not_init = Err(GameError::State(StateError::NotInitialized));

    assert_eq!(
        controller.flip_card(CardId::new(0)),
        FlipResult::Invalid(FlipRejection::NotInitialized)
    );
    assert_eq!(controller.start_game(), not_init);
    assert_eq!(controller.pause_game(), not_init);
    assert_eq!(controller.resume_game(), not_init);
    assert_eq!(controller.current_player(), Err(GameError::State(StateError::NotInitialized)));
    assert!(controller.game_state().is_none());
    assert!(controller.phase().is_none());
}

#[test]
fn test_init_validates_player_count() {
    let mut controller =
        GameController::with_clock(ControllerConfig::default(), ThemeCatalog::new(), ManualClock::new());

    for count in [0usize, 5] {
        let names: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
        let config = GameConfig::new(Difficulty::Easy, "animals").with_players(names);
        assert_eq!(
            controller.init_game(config),
            Err(GameError::Validation(ValidationError::PlayerCount { count }))
        );
    }
    assert!(controller.game_state().is_none());

    for count in 1..=4usize {
        let names: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
        let config = GameConfig::new(Difficulty::Easy, "animals").with_players(names);
        assert!(controller.init_game(config).is_ok());
        assert_eq!(controller.game_state().unwrap().player_count(), count);
    }
}

#[test]
fn test_initial_state() {
    let (controller, _, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    let state = controller.game_state().unwrap();

    assert_eq!(controller.phase(), Some(Phase::Initialized));
    assert_eq!(state.cards().len(), 8);
    assert!(state.cards().iter().all(|c| c.is_hidden()));
    assert_eq!(state.current_player_index(), PlayerId::new(0));
    assert!(state.player(PlayerId::new(0)).is_active);
    assert!(!state.player(PlayerId::new(1)).is_active);
    assert!(state.players().values().all(|p| p.total_flips == 0 && p.matches == 0 && p.score == 0));
    assert_eq!(state.time_remaining(), 30);
    assert!(log.is_empty());
}

#[test]
fn test_blank_names_get_defaults() {
    let (controller, _, _) = setup(ControllerConfig::default(), &["", "  Bob  "]);
    let state = controller.game_state().unwrap();

    assert_eq!(state.player(PlayerId::new(0)).name, "Player 1");
    assert_eq!(state.player(PlayerId::new(1)).name, "Bob");
}

#[test]
fn test_start_emits_game_started() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);

    controller.start_game().unwrap();

    assert_eq!(controller.phase(), Some(Phase::Running));
    match log.last("gameStarted") {
        Some(GameEvent::GameStarted {
            current_player,
            time_remaining,
        }) => {
            assert_eq!(current_player.name, "Ada");
            assert_eq!(time_remaining, 30);
        }
        other => panic!("expected gameStarted, got {:?}", other),
    }
}

#[test]
fn test_flip_while_initialized_is_rejected() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada"]);
    let (a, _) = pairs(&controller)[0];

    assert_eq!(controller.flip_card(a), FlipResult::Invalid(FlipRejection::Paused));
    assert!(!is_flipped(&controller, a));
    assert!(log.is_empty());
}

#[test]
fn test_invalid_flips_do_not_mutate() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let (a, b) = pairs(&controller)[0];

    assert_eq!(controller.flip_card(a), FlipResult::FirstCard);
    let before = controller.game_state();

    assert_eq!(controller.flip_card(a), FlipResult::Invalid(FlipRejection::AlreadyFlipped));
    assert_eq!(
        controller.flip_card(CardId::new(999)),
        FlipResult::Invalid(FlipRejection::UnknownCard)
    );
    assert_eq!(controller.game_state(), before);
    assert_eq!(log.count("cardFlipped"), 1);

    controller.flip_card(b);
    clock.advance(1000);
    controller.poll();
    let before = controller.game_state();

    assert_eq!(controller.flip_card(a), FlipResult::Invalid(FlipRejection::AlreadyMatched));
    assert_eq!(controller.flip_card(b), FlipResult::Invalid(FlipRejection::AlreadyMatched));
    assert_eq!(controller.game_state(), before);
}

#[test]
fn test_flip_counts_and_events() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let (a, _) = pairs(&controller)[0];

    controller.flip_card(a);

    let state = controller.game_state().unwrap();
    assert_eq!(state.revealed(), &[a]);
    assert_eq!(state.player(PlayerId::new(0)).total_flips, 1);
    match log.last("cardFlipped") {
        Some(GameEvent::CardFlipped { card, player }) => {
            assert_eq!(card.id, a);
            assert!(card.is_flipped);
            assert_eq!(player.name, "Ada");
            assert_eq!(player.total_flips, 1);
        }
        other => panic!("expected cardFlipped, got {:?}", other),
    }
}

#[test]
fn test_second_flip_acknowledges_only() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let (a, b) = pairs(&controller)[0];

    assert_eq!(controller.flip_card(a), FlipResult::FirstCard);
    assert_eq!(controller.flip_card(b), FlipResult::FirstCard);

    // Nothing resolved until the delay elapses.
    assert_eq!(log.count("match"), 0);
    assert_eq!(controller.pending_comparisons(), 1);
    assert!(is_flipped(&controller, a));
    assert!(!controller.game_state().unwrap().card(a).unwrap().is_matched);
}

#[test]
fn test_match_keeps_player_and_resets_timer() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    clock.advance(3000);
    controller.poll();
    assert_eq!(controller.game_state().unwrap().time_remaining(), 27);

    let (a, b) = pairs(&controller)[0];
    play_pair(&mut controller, &clock, a, b);

    let state = controller.game_state().unwrap();
    assert!(state.card(a).unwrap().is_matched);
    assert!(state.card(b).unwrap().is_matched);
    assert!(state.revealed().is_empty());
    assert_eq!(state.current_player_index(), PlayerId::new(0));
    assert_eq!(state.time_remaining(), 30);
    assert_eq!(state.phase(), Phase::Running);

    match log.last("match") {
        Some(GameEvent::Match { cards, player }) => {
            assert!(cards.iter().all(|c| c.is_matched));
            assert_eq!(player.matches, 1);
            assert_eq!(player.total_flips, 2);
            assert_eq!(player.score, 500);
        }
        other => panic!("expected match, got {:?}", other),
    }
    assert_eq!(log.count("mismatch"), 0);
    assert_eq!(log.count("turnSwitch"), 0);

    // The fresh countdown keeps running.
    clock.advance(1000);
    controller.poll();
    assert_eq!(controller.game_state().unwrap().time_remaining(), 29);
}

#[test]
fn test_mismatch_hands_off() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let p = pairs(&controller);
    let (a0, a1) = (p[0].0, p[1].0);

    play_pair(&mut controller, &clock, a0, a1);

    let state = controller.game_state().unwrap();
    assert!(!state.card(a0).unwrap().is_flipped);
    assert!(!state.card(a1).unwrap().is_flipped);
    assert_eq!(state.current_player_index(), PlayerId::new(1));
    assert!(state.player(PlayerId::new(1)).is_active);
    assert!(!state.player(PlayerId::new(0)).is_active);
    assert_eq!(state.phase(), Phase::Paused);
    assert_eq!(state.time_remaining(), 30);
    assert_eq!(state.player(PlayerId::new(0)).total_flips, 2);
    assert_eq!(state.player(PlayerId::new(0)).matches, 0);

    assert_eq!(log.names()[log.len() - 2..], ["mismatch", "turnSwitch"]);
    match log.last("turnSwitch") {
        Some(GameEvent::TurnSwitch { previous, current }) => {
            assert_eq!(previous.name, "Ada");
            assert!(!previous.is_active);
            assert_eq!(current.name, "Bob");
            assert!(current.is_active);
        }
        other => panic!("expected turnSwitch, got {:?}", other),
    }
    assert_eq!(log.count("gamePaused"), 0);

    // Next player confirms before flipping.
    assert_eq!(controller.flip_card(a0), FlipResult::Invalid(FlipRejection::Paused));
    controller.resume_game().unwrap();
    assert_eq!(controller.phase(), Some(Phase::Running));
    assert_eq!(controller.flip_card(a0), FlipResult::FirstCard);
    assert_eq!(controller.current_player().unwrap().total_flips, 1);
}

#[test]
fn test_turn_rotation_wraps() {
    let (mut controller, clock, _) = setup(ControllerConfig::default(), &["Ada", "Bob", "Cy"]);
    controller.start_game().unwrap();
    let p = pairs(&controller);
    let (a0, a1) = (p[0].0, p[1].0);

    let mut seats = Vec::new();
    for _ in 0..4 {
        play_pair(&mut controller, &clock, a0, a1);
        seats.push(controller.current_player().unwrap().id);
        controller.resume_game().unwrap();
    }

    assert_eq!(
        seats,
        vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)]
    );
}

#[test]
fn test_pause_resume_preserves_time() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada"]);
    controller.start_game().unwrap();

    clock.advance(2000);
    controller.pause_game().unwrap();
    assert_eq!(controller.phase(), Some(Phase::Paused));
    assert_eq!(log.last("gamePaused"), Some(GameEvent::GamePaused { time_remaining: 28 }));

    clock.advance(10_000);
    assert_eq!(controller.poll(), 0);
    assert_eq!(controller.game_state().unwrap().time_remaining(), 28);

    controller.resume_game().unwrap();
    assert_eq!(log.last("gameResumed"), Some(GameEvent::GameResumed { time_remaining: 28 }));

    clock.advance(1000);
    controller.poll();
    assert_eq!(controller.game_state().unwrap().time_remaining(), 27);
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada"]);

    // Initialized counts as paused.
    controller.pause_game().unwrap();
    assert_eq!(log.count("gamePaused"), 0);

    controller.start_game().unwrap();
    controller.resume_game().unwrap();
    assert_eq!(log.count("gameResumed"), 0);

    controller.pause_game().unwrap();
    controller.pause_game().unwrap();
    assert_eq!(log.count("gamePaused"), 1);

    // Starting a started game resumes it.
    controller.start_game().unwrap();
    assert_eq!(log.count("gameStarted"), 1);
    assert_eq!(log.count("gameResumed"), 1);
}

#[test]
fn test_resume_from_initialized_starts_countdown() {
    let (mut controller, clock, _) = setup(ControllerConfig::default(), &["Ada"]);

    controller.resume_game().unwrap();
    assert_eq!(controller.phase(), Some(Phase::Running));

    clock.advance(1000);
    controller.poll();
    assert_eq!(controller.game_state().unwrap().time_remaining(), 29);
}

#[test]
fn test_hold_policy_blocks_third_flip() {
    let config = ControllerConfig::default().with_reveal_policy(RevealPolicy::HoldUntilCompare);
    let (mut controller, clock, _) = setup(config, &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let p = pairs(&controller);

    controller.flip_card(p[0].0);
    controller.flip_card(p[1].0);
    assert_eq!(controller.game_state().unwrap().revealed().len(), 2);
    assert_eq!(
        controller.flip_card(p[2].0),
        FlipResult::Invalid(FlipRejection::PairPending)
    );

    clock.advance(1000);
    controller.poll();
    assert!(controller.game_state().unwrap().revealed().is_empty());
}

#[test]
fn test_release_policy_allows_flip_during_delay() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let p = pairs(&controller);

    controller.flip_card(p[0].0);
    controller.flip_card(p[0].1);
    assert!(controller.game_state().unwrap().revealed().is_empty());

    assert_eq!(controller.flip_card(p[1].0), FlipResult::FirstCard);
    assert_eq!(controller.game_state().unwrap().revealed(), &[p[1].0]);

    clock.advance(1000);
    controller.poll();

    let state = controller.game_state().unwrap();
    assert_eq!(log.count("match"), 1);
    assert!(state.card(p[1].0).unwrap().is_flipped);
    assert_eq!(state.revealed(), &[p[1].0]);
    assert_eq!(controller.pending_comparisons(), 0);
}

#[test]
fn test_card_flipped_during_mismatch_delay_is_hidden_on_hand_off() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let p = pairs(&controller);

    // Ada misses, then flips a third card while the comparison is pending.
    controller.flip_card(p[0].0);
    controller.flip_card(p[1].0);
    assert_eq!(controller.flip_card(p[2].0), FlipResult::FirstCard);

    clock.advance(1000);
    controller.poll();

    assert_eq!(log.names()[log.len() - 2..], ["mismatch", "turnSwitch"]);
    let state = controller.game_state().unwrap();
    assert_eq!(state.current_player_index(), PlayerId::new(1));
    assert!(state.revealed().is_empty());
    assert!(!is_flipped(&controller, p[2].0));
    assert_eq!(state.player(PlayerId::new(0)).total_flips, 3);

    // Bob's single flip cannot complete Ada's card.
    controller.resume_game().unwrap();
    controller.flip_card(p[2].1);
    clock.advance(1000);
    controller.poll();

    let state = controller.game_state().unwrap();
    assert_eq!(log.count("match"), 0);
    assert_eq!(state.revealed(), &[p[2].1]);
    let bob = state.player(PlayerId::new(1));
    assert_eq!((bob.total_flips, bob.matches, bob.score), (1, 0, 0));
}

#[test]
fn test_destroy_cancels_pending_work() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada", "Bob"]);
    controller.start_game().unwrap();
    let (a, b) = pairs(&controller)[0];
    controller.flip_card(a);
    controller.flip_card(b);

    controller.destroy();
    clock.advance(60_000);

    assert_eq!(controller.poll(), 0);
    assert_eq!(log.count("match"), 0);
    assert_eq!(log.count("timerTick"), 0);
    assert!(controller.game_state().is_none());
    assert!(controller.phase().is_none());

    // Reusable after teardown.
    controller
        .init_game(GameConfig::new(Difficulty::Medium, "fruits").with_player("Ada"))
        .unwrap();
    assert_eq!(controller.game_state().unwrap().cards().len(), 16);
}

#[test]
fn test_game_over_is_terminal() {
    let (mut controller, clock, log) = setup(ControllerConfig::default(), &["Ada"]);
    controller.start_game().unwrap();

    for (a, b) in pairs(&controller) {
        play_pair(&mut controller, &clock, a, b);
    }

    assert_eq!(controller.phase(), Some(Phase::GameOver));
    assert_eq!(log.count("gameOver"), 1);
    assert_eq!(controller.flip_card(CardId::new(0)), FlipResult::GameOver);
    assert_eq!(controller.start_game(), Err(GameError::State(StateError::GameOver)));
    assert_eq!(controller.resume_game(), Err(GameError::State(StateError::GameOver)));
    assert_eq!(controller.pause_game(), Ok(()));

    assert!(controller.next_due().is_none());
    clock.advance(60_000);
    assert_eq!(controller.poll(), 0);
    assert_eq!(log.count("timerExpired"), 0);
}

#[test]
fn test_snapshots_are_detached() {
    let (mut controller, _, _) = setup(ControllerConfig::default(), &["Ada"]);
    controller.start_game().unwrap();
    let (a, _) = pairs(&controller)[0];

    let snapshot = controller.game_state().unwrap();
    controller.flip_card(a);

    assert!(!snapshot.card(a).unwrap().is_flipped);
    assert!(is_flipped(&controller, a));
}

#[test]
fn test_unsubscribe() {
    let (mut controller, _, log) = setup(ControllerConfig::default(), &["Ada"]);
    let other = EventLog::new();
    let id = controller.subscribe(other.listener());

    controller.start_game().unwrap();
    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));
    controller.pause_game().unwrap();

    assert_eq!(other.names(), vec!["gameStarted"]);
    assert_eq!(log.names(), vec!["gameStarted", "gamePaused"]);
}
