//! The game controller.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --init_game--> Initialized (paused)
//! Initialized --start_game/resume_game--> Running
//! Running <--pause_game/resume_game--> Paused
//! Running --mismatch/expiry--> Paused (next player)
//! Running --last pair matched--> GameOver
//! ```
//!
//! ## Time
//!
//! The controller never sleeps or spawns. Comparisons and countdown ticks
//! are queued on a `Timeline` against an injected `Clock`, and `poll` fires
//! everything that has come due. Every mutating operation polls first, so
//! a caller that only polls occasionally still observes effects in the
//! order real callbacks would have produced them.

use crate::cards::{is_well_paired, AssetProvider, CardId, DeckBuilder};
use crate::core::{
    ControllerConfig, GameConfig, GameError, GameRng, GameState, Phase, Player, PlayerId,
    RevealPolicy, StateError, ValidationError,
};
use crate::events::{EventBus, GameEvent, ListenerId};
use crate::rules::{
    check_flip, finish, hand_off, hide_revealed, resolve_pair, reveal, set_active, FlipRejection,
    FlipResult, PairOutcome, TurnChange,
};
use crate::services::SnapshotStore;
use crate::timing::{Clock, PendingComparison, SystemClock, Task, TaskId, TickOutcome, Timeline, TurnTimer};

/// Owns one game at a time and drives it.
///
/// ```
/// use rust_pairs::{ControllerConfig, Difficulty, GameConfig, GameController, ThemeCatalog};
///
/// let mut controller = GameController::new(ControllerConfig::default().with_seed(1), ThemeCatalog::new());
/// controller
///     .init_game(GameConfig::new(Difficulty::Easy, "animals").with_players(["Ada", "Bob"]))
///     .unwrap();
/// controller.start_game().unwrap();
///
/// assert_eq!(controller.current_player().unwrap().name, "Ada");
/// assert_eq!(controller.game_state().unwrap().cards().len(), 8);
/// ```
pub struct GameController {
    config: ControllerConfig,
    assets: Box<dyn AssetProvider>,
    clock: Box<dyn Clock>,
    timeline: Timeline,
    events: EventBus,
    rng: GameRng,
    game: Option<GameState>,
    /// Bumped whenever the game is replaced or discarded.
    generation: u64,
}

impl GameController {
    /// Create a controller on the system clock.
    pub fn new(config: ControllerConfig, assets: impl AssetProvider + 'static) -> Self {
        Self::with_clock(config, assets, SystemClock::new())
    }

    /// Create a controller on a custom clock.
    pub fn with_clock(
        config: ControllerConfig,
        assets: impl AssetProvider + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self {
            config,
            assets: Box::new(assets),
            clock: Box::new(clock),
            timeline: Timeline::new(),
            events: EventBus::new(),
            rng,
            game: None,
            generation: 0,
        }
    }

    /// Controller configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // === Lifecycle ===

    /// Deal a new game, replacing any current one.
    ///
    /// All-or-nothing: on error the previous game (if any) is left untouched.
    pub fn init_game(&mut self, config: GameConfig) -> Result<(), GameError> {
        self.poll();
        self.config.validate()?;
        config.validate()?;

        let deck = DeckBuilder::new(config.difficulty, config.theme.clone())
            .build(self.assets.as_mut(), &mut self.rng)?;

        let timer = TurnTimer::new(self.config.turn_duration_secs, self.config.tick_interval_ms);
        let state = GameState::new(config, deck, timer);

        self.discard();
        tracing::info!(
            difficulty = %state.config().difficulty,
            theme = %state.config().theme,
            players = state.player_count(),
            generation = self.generation,
            "Game initialized"
        );
        self.game = Some(state);
        Ok(())
    }

    /// Start the countdown for the first time.
    ///
    /// On an already-started game this behaves like `resume_game`.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.poll();
        let now = self.clock.now_ms();
        let game = live_game(&mut self.game)?;
        if game.started {
            return self.resume_game();
        }

        game.started = true;
        game.is_paused = false;
        game.timer.start(&mut self.timeline, now, self.generation);

        tracing::info!(player = %game.current_player_index(), "Game started");
        let event = GameEvent::GameStarted {
            current_player: game.current_player().clone(),
            time_remaining: game.time_remaining(),
        };
        self.events.emit(event);
        Ok(())
    }

    /// Stop the countdown, keeping the remaining time.
    ///
    /// No-op when already paused or after game over.
    pub fn pause_game(&mut self) -> Result<(), GameError> {
        self.poll();
        let game = self.game.as_mut().ok_or(StateError::NotInitialized)?;
        if game.is_game_over() || game.is_paused() {
            return Ok(());
        }

        game.timer.stop(&mut self.timeline);
        game.is_paused = true;

        tracing::info!(time_remaining = game.time_remaining(), "Game paused");
        let event = GameEvent::GamePaused {
            time_remaining: game.time_remaining(),
        };
        self.events.emit(event);
        Ok(())
    }

    /// Restart the countdown from the stored remaining time.
    ///
    /// Also used to confirm the hand-off between turns. No-op when running.
    pub fn resume_game(&mut self) -> Result<(), GameError> {
        self.poll();
        let now = self.clock.now_ms();
        let game = live_game(&mut self.game)?;
        if !game.is_paused() {
            return Ok(());
        }

        game.started = true;
        game.is_paused = false;
        game.timer.start(&mut self.timeline, now, self.generation);

        tracing::info!(
            player = %game.current_player_index(),
            time_remaining = game.time_remaining(),
            "Game resumed"
        );
        let event = GameEvent::GameResumed {
            time_remaining: game.time_remaining(),
        };
        self.events.emit(event);
        Ok(())
    }

    /// Cancel all scheduled work and discard the game.
    ///
    /// The controller stays usable; the next `init_game` starts fresh.
    pub fn destroy(&mut self) {
        self.discard();
        tracing::info!(generation = self.generation, "Controller reset");
    }

    fn discard(&mut self) {
        self.timeline.clear();
        self.generation += 1;
        self.game = None;
    }

    // === Play ===

    /// Turn a card face-up for the active player.
    ///
    /// The second card of a pair is acknowledged with `FirstCard` too; the
    /// comparison runs `compare_delay_ms` later and reports through events.
    pub fn flip_card(&mut self, card: CardId) -> FlipResult {
        self.poll();
        let now = self.clock.now_ms();

        let Some(game) = self.game.as_mut() else {
            tracing::debug!(%card, "Flip rejected: no game");
            return FlipResult::Invalid(FlipRejection::NotInitialized);
        };
        if game.is_game_over() {
            return FlipResult::GameOver;
        }
        if let Err(reason) = check_flip(game, card) {
            tracing::debug!(%card, %reason, "Flip rejected");
            return FlipResult::Invalid(reason);
        }
        let Some(flipped) = reveal(game, card) else {
            return FlipResult::Invalid(FlipRejection::UnknownCard);
        };

        let player = game.current_player().clone();
        tracing::debug!(%card, player = %player.id, "Card flipped");

        if let &[first, second] = game.revealed() {
            let pending = PendingComparison {
                first,
                second,
                player: player.id,
            };
            self.timeline.schedule(
                now + self.config.compare_delay_ms,
                self.generation,
                Task::Compare(pending),
            );
            if self.config.reveal_policy == RevealPolicy::ReleaseBeforeCompare {
                game.revealed.clear();
            }
        }

        self.events.emit(GameEvent::CardFlipped {
            card: flipped,
            player,
        });
        FlipResult::FirstCard
    }

    /// Fire every scheduled task that is due. Returns how many ran.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;

        while let Some(entry) = self.timeline.pop_due(now) {
            if entry.generation != self.generation {
                tracing::debug!(task = ?entry.task, "Dropping task from a replaced game");
                continue;
            }
            fired += 1;
            match entry.task {
                Task::Compare(pending) => self.on_compare(pending, entry.due_ms),
                Task::TimerTick => self.on_tick(entry.id, entry.due_ms),
            }
        }
        fired
    }

    fn on_compare(&mut self, pending: PendingComparison, due_ms: u64) {
        let generation = self.generation;
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if game.is_game_over() {
            return;
        }

        match resolve_pair(game, &pending) {
            PairOutcome::Stale => {
                tracing::debug!(
                    first = %pending.first,
                    second = %pending.second,
                    "Dropping stale comparison"
                );
            }
            PairOutcome::Matched(cards) => {
                // Same player continues on a fresh countdown.
                if pending.player == game.current_player_index() {
                    game.timer.stop(&mut self.timeline);
                    game.timer.reset();
                    if !game.is_paused() {
                        game.timer.start(&mut self.timeline, due_ms, generation);
                    }
                }

                let player = game.player(pending.player).clone();
                tracing::debug!(player = %player.id, matches = player.matches, "Match");
                self.events.emit(GameEvent::Match { cards, player });

                if game.all_matched() {
                    let standings = finish(game, &mut self.timeline);
                    self.events.emit(GameEvent::GameOver {
                        winner: standings.winner().cloned(),
                        winners: standings.winners(),
                        final_scores: standings.final_scores,
                    });
                }
            }
            PairOutcome::Mismatched(cards) => {
                let player = game.player(pending.player).clone();
                tracing::debug!(player = %player.id, "Mismatch");
                self.events.emit(GameEvent::Mismatch { cards, player });

                // The turn may already have moved on (expiry during the delay).
                if pending.player == game.current_player_index() {
                    let change = hand_off(game, &mut self.timeline);
                    emit_turn_switch(&mut self.events, change);
                }
            }
        }
    }

    fn on_tick(&mut self, id: TaskId, due_ms: u64) {
        let generation = self.generation;
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if game.is_game_over() {
            return;
        }

        match game.timer.on_tick(id) {
            TickOutcome::Stale => {}
            TickOutcome::Remaining(time_remaining) => {
                game.timer.start(&mut self.timeline, due_ms, generation);
                self.events.emit(GameEvent::TimerTick { time_remaining });
            }
            TickOutcome::Expired => {
                self.events.emit(GameEvent::TimerTick { time_remaining: 0 });

                let player = game.current_player().clone();
                let hidden = hide_revealed(game);
                tracing::info!(player = %player.id, hidden = hidden.len(), "Turn expired");
                self.events.emit(GameEvent::TimerExpired { player, hidden });

                let change = hand_off(game, &mut self.timeline);
                emit_turn_switch(&mut self.events, change);
            }
        }
    }

    // === Queries ===

    /// Snapshot of the active player.
    pub fn current_player(&self) -> Result<Player, GameError> {
        let game = self.game.as_ref().ok_or(StateError::NotInitialized)?;
        Ok(game.current_player().clone())
    }

    /// Snapshot of the whole game, or `None` before `init_game`.
    ///
    /// The deck is persistent, so this is cheap. Mutating the copy has no
    /// effect on play.
    #[must_use]
    pub fn game_state(&self) -> Option<GameState> {
        self.game.clone()
    }

    /// Lifecycle phase, or `None` before `init_game`.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.game.as_ref().map(GameState::phase)
    }

    /// Due time of the next scheduled task, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.timeline.next_due()
    }

    /// Comparisons waiting for their delay to elapse.
    #[must_use]
    pub fn pending_comparisons(&self) -> usize {
        self.timeline.pending_comparisons()
    }

    // === Events ===

    /// Register an event listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    /// Remove an event listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Persistence ===

    /// Install a previously saved game.
    ///
    /// Cards left face-up but unmatched are turned back down, the countdown
    /// keeps its remaining time and the game waits paused for the active
    /// player. Pending work from the replaced game is dropped.
    pub fn restore_game(&mut self, mut state: GameState) -> Result<(), GameError> {
        self.poll();
        check_restorable(&state)?;

        state.reindex();
        state.timer.detach();
        state.revealed.clear();
        for card in state.cards.iter_mut() {
            if card.is_flipped && !card.is_matched {
                card.hide();
            }
        }
        if !state.is_game_over() {
            let current = state.current_player_index();
            set_active(&mut state, current);
            state.is_paused = true;
        }

        self.discard();
        tracing::info!(
            phase = ?state.phase(),
            matched_pairs = state.matched_pairs(),
            generation = self.generation,
            "Game restored"
        );
        self.game = Some(state);
        Ok(())
    }

    /// Encode the current game with bincode and hand it to `store`.
    pub fn save_snapshot(&mut self, store: &mut dyn SnapshotStore) -> Result<(), GameError> {
        self.poll();
        let game = self.game.as_ref().ok_or(StateError::NotInitialized)?;
        let blob = bincode::serialize(game).map_err(crate::core::ResourceError::from)?;
        tracing::debug!(bytes = blob.len(), "Saving snapshot");
        store.save(blob)?;
        Ok(())
    }

    /// Restore the game saved in `store`. Returns `false` if it holds none.
    pub fn load_snapshot(&mut self, store: &dyn SnapshotStore) -> Result<bool, GameError> {
        let Some(blob) = store.load()? else {
            return Ok(false);
        };
        let state: GameState = bincode::deserialize(&blob)
            .map_err(|e| ValidationError::MalformedSnapshot(e.to_string()))?;
        self.restore_game(state)?;
        Ok(true)
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("scheduled", &self.timeline.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

fn live_game(game: &mut Option<GameState>) -> Result<&mut GameState, StateError> {
    let game = game.as_mut().ok_or(StateError::NotInitialized)?;
    if game.is_game_over() {
        return Err(StateError::GameOver);
    }
    Ok(game)
}

fn emit_turn_switch(events: &mut EventBus, change: TurnChange) {
    events.emit(GameEvent::TurnSwitch {
        previous: change.previous,
        current: change.current,
    });
}

fn check_restorable(state: &GameState) -> Result<(), ValidationError> {
    state.config().validate()?;

    let malformed = |reason: &str| ValidationError::MalformedSnapshot(reason.to_string());
    if state.player_count() != state.config().players.len() {
        return Err(malformed("player list does not match configuration"));
    }
    if state.current_player_index().index() >= state.player_count() {
        return Err(malformed("current player out of range"));
    }
    let cards: Vec<_> = state.cards().iter().cloned().collect();
    if cards.is_empty() || !is_well_paired(&cards) {
        return Err(malformed("deck is not made of pairs"));
    }
    if cards.iter().any(|c| c.is_matched && !c.is_flipped) {
        return Err(malformed("matched card is face-down"));
    }
    if state.is_game_over() != state.all_matched() {
        return Err(malformed("game-over flag disagrees with the board"));
    }

    let mut credited: u64 = 0;
    for (seat, player) in PlayerId::all(state.player_count()).zip(state.players().values()) {
        if player.id != seat {
            return Err(malformed("player seated out of order"));
        }
        if 2 * u64::from(player.matches) > u64::from(player.total_flips) {
            return Err(malformed("player has more matches than flips allow"));
        }
        credited += u64::from(player.matches);
    }
    if credited != state.matched_pairs() as u64 {
        return Err(malformed("player matches disagree with the board"));
    }
    Ok(())
}
