//! Plays one game of pairs between memory bots and prints the standings.
//!
//! Bots remember faces they have seen through the event stream and recall
//! each one with a configurable probability. Time is virtual, so a full
//! game runs instantly.

use rustc_hash::FxHashMap;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_pairs::core::{Difficulty, GameConfig, GameRng, GameState, Phase};
use rust_pairs::{
    submit_final_scores, AssetRef, CachedAssets, CardId, ControllerConfig, EventLog, FlipResult,
    GameController, GameEvent, InMemoryLeaderboard, Leaderboard, ManualClock, ThemeCatalog,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a game of pairs between memory bots", long_about = None)]
struct Args {
    /// Comma-separated player names (1-4)
    #[arg(short, long, value_delimiter = ',', default_value = "Ada,Bob")]
    players: Vec<String>,

    /// easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Asset theme (animals, fruits, space)
    #[arg(short, long, default_value = "animals")]
    theme: String,

    /// Deal seed; overrides PAIRS_SEED
    #[arg(long)]
    seed: Option<u64>,

    /// Chance in percent that a bot recalls a face it has seen
    #[arg(long, default_value_t = 70)]
    recall: u8,

    /// Virtual time a bot spends before each flip
    #[arg(long, default_value_t = 800)]
    think_ms: u64,

    /// Leaderboard rows to print
    #[arg(long, default_value_t = 5)]
    top: usize,
}

/// Faces seen so far, shared by every bot.
#[derive(Default)]
struct Memory {
    seen: FxHashMap<AssetRef, Vec<CardId>>,
}

impl Memory {
    fn learn(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if let GameEvent::CardFlipped { card, .. } = event {
                let ids = self.seen.entry(card.face).or_default();
                if !ids.contains(&card.id) {
                    ids.push(card.id);
                }
            }
        }
    }

    fn known(&self, state: &GameState, face: &AssetRef) -> Vec<CardId> {
        self.seen
            .get(face)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| state.card(*id).is_some_and(|c| c.is_hidden()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_known(&self, id: CardId) -> bool {
        self.seen.values().any(|ids| ids.contains(&id))
    }
}

struct Bot<'a> {
    memory: &'a Memory,
    rng: &'a mut GameRng,
    recall: u8,
}

impl Bot<'_> {
    fn remembers(&mut self) -> bool {
        self.rng.gen_range_usize(0..100) < usize::from(self.recall)
    }

    fn pick_unknown(&mut self, state: &GameState, except: Option<CardId>) -> Option<CardId> {
        let hidden: Vec<CardId> = state
            .cards()
            .iter()
            .filter(|c| c.is_hidden() && Some(c.id) != except)
            .map(|c| c.id)
            .collect();
        let unknown: Vec<CardId> = hidden
            .iter()
            .copied()
            .filter(|id| !self.memory.is_known(*id))
            .collect();
        let pool = if unknown.is_empty() { hidden } else { unknown };
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.gen_range_usize(0..pool.len())])
    }

    fn first(&mut self, state: &GameState) -> Option<CardId> {
        if self.remembers() {
            let mut faces: Vec<&AssetRef> = self.memory.seen.keys().collect();
            faces.sort();
            for face in faces {
                let known = self.memory.known(state, face);
                if known.len() >= 2 {
                    return Some(known[0]);
                }
            }
        }
        self.pick_unknown(state, None)
    }

    fn second(&mut self, state: &GameState, first: CardId) -> Option<CardId> {
        let face = state.card(first)?.face.clone();
        if self.remembers() {
            if let Some(partner) = self.memory.known(state, &face).into_iter().find(|id| *id != first) {
                return Some(partner);
            }
        }
        self.pick_unknown(state, Some(first))
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = ControllerConfig::from_env();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let compare_delay = config.compare_delay_ms;
    let bot_seed = config.seed.unwrap_or_else(rand::random);

    let clock = ManualClock::new();
    let mut controller =
        GameController::with_clock(config, CachedAssets::new(ThemeCatalog::new()), clock.clone());
    let log = EventLog::new();
    controller.subscribe(log.listener());

    let game = GameConfig::new(args.difficulty, args.theme.clone()).with_players(args.players.clone());
    controller.init_game(game).context("failed to deal the game")?;
    controller.start_game()?;

    let mut memory = Memory::default();
    let mut rng = GameRng::new(bot_seed);
    let max_turns = args.difficulty.total_cards() * 50;

    for _ in 0..max_turns {
        match controller.phase() {
            Some(Phase::GameOver) => break,
            Some(Phase::Paused) | Some(Phase::Initialized) => controller.resume_game()?,
            _ => {}
        }
        memory.learn(log.take());

        let state = controller.game_state().context("game vanished")?;
        let mut bot = Bot {
            memory: &memory,
            rng: &mut rng,
            recall: args.recall,
        };
        let Some(first) = bot.first(&state) else {
            // Everything left is face-up and waiting for a comparison.
            clock.advance(compare_delay);
            controller.poll();
            continue;
        };

        clock.advance(args.think_ms);
        if controller.flip_card(first) != FlipResult::FirstCard {
            continue;
        }
        let state = controller.game_state().context("game vanished")?;
        if let Some(second) = bot.second(&state, first) {
            clock.advance(args.think_ms);
            controller.flip_card(second);
        }
        clock.advance(compare_delay);
        controller.poll();
    }
    memory.learn(log.take());

    let state = controller.game_state().context("game vanished")?;
    if !state.is_game_over() {
        bail!("game did not finish within {} turns", max_turns);
    }

    println!("Final scores ({}, {}):", state.config().difficulty, state.config().theme);
    let mut players: Vec<_> = state.players().values().cloned().collect();
    players.sort_by(|a, b| b.score.cmp(&a.score));
    for player in &players {
        println!(
            "  {:<12} score {:>4}  matches {:>2}  flips {:>3}",
            player.name, player.score, player.matches, player.total_flips
        );
    }
    match state.winner() {
        Some(winner) => println!("Winner: {}", winner.name),
        None => {
            let names: Vec<&str> = state.winners().iter().map(|p| p.name.as_str()).collect();
            println!("Tie between {}", names.join(", "));
        }
    }

    let mut leaderboard = InMemoryLeaderboard::new();
    let submitted = submit_final_scores(&mut leaderboard, &state);
    info!(records = submitted.len(), "Submitted to leaderboard");
    println!("Leaderboard:");
    for (rank, record) in leaderboard.top(args.top)?.iter().enumerate() {
        println!("  {}. {} ({})", rank + 1, record.name, record.score);
    }

    Ok(())
}
