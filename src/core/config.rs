//! Game and controller configuration.
//!
//! - `Difficulty`: static table of unique/total card counts
//! - `ThemeId`: opaque asset theme identifier
//! - `GameConfig`: per-game input to `init_game`
//! - `ControllerConfig`: timing and policy knobs shared by every game a
//!   controller runs
//!
//! Configuration is plain data. `ControllerConfig::from_env` overlays
//! environment variables on the defaults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Minimum number of seated players.
pub const MIN_PLAYERS: usize = 1;

/// Maximum number of seated players.
pub const MAX_PLAYERS: usize = 4;

/// Board size preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of distinct faces (pairs) on the board.
    #[must_use]
    pub const fn unique_count(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    /// Number of cards on the board.
    #[must_use]
    pub const fn total_cards(self) -> usize {
        self.unique_count() * 2
    }

    /// Lowercase name, as used on the command line and in env vars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Asset theme identifier. Asset providers assign meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThemeId(pub String);

impl ThemeId {
    /// Create a new theme ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-game configuration passed to `init_game`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size.
    pub difficulty: Difficulty,

    /// Display names, one per seat (1-4).
    pub players: Vec<String>,

    /// Asset theme to deal from.
    pub theme: ThemeId,
}

impl GameConfig {
    /// Create a configuration.
    pub fn new(difficulty: Difficulty, theme: impl Into<String>) -> Self {
        Self {
            difficulty,
            players: Vec::new(),
            theme: ThemeId::new(theme),
        }
    }

    /// Seat another player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.players.push(name.into());
        self
    }

    /// Seat several players (builder pattern).
    #[must_use]
    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check the seat count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ValidationError::PlayerCount { count });
        }
        Ok(())
    }
}

/// When the revealed set is released after the second flip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Clear the revealed set as soon as the comparison is scheduled.
    /// New flips are accepted while the comparison is pending.
    #[default]
    ReleaseBeforeCompare,

    /// Keep both cards in the revealed set until the comparison fires.
    /// A third flip is rejected while the comparison is pending.
    HoldUntilCompare,
}

impl FromStr for RevealPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "release_before_compare" | "release" => Ok(RevealPolicy::ReleaseBeforeCompare),
            "hold_until_compare" | "hold" => Ok(RevealPolicy::HoldUntilCompare),
            other => Err(format!("unknown reveal policy '{other}'")),
        }
    }
}

/// Controller configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Seconds on the clock at the start of every turn (default: 30).
    pub turn_duration_secs: u32,

    /// Real time between countdown ticks in milliseconds (default: 1000).
    pub tick_interval_ms: u64,

    /// Delay between the second flip and its comparison (default: 1000).
    pub compare_delay_ms: u64,

    /// Revealed-set release behavior while a comparison is pending.
    pub reveal_policy: RevealPolicy,

    /// Deal seed. `None` draws a fresh seed per controller.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            turn_duration_secs: 30,
            tick_interval_ms: 1000,
            compare_delay_ms: 1000,
            reveal_policy: RevealPolicy::default(),
            seed: None,
        }
    }
}

impl ControllerConfig {
    /// Set the turn duration in seconds.
    #[must_use]
    pub fn with_turn_duration(mut self, secs: u32) -> Self {
        self.turn_duration_secs = secs;
        self
    }

    /// Set the tick interval in milliseconds.
    #[must_use]
    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the comparison delay in milliseconds.
    #[must_use]
    pub fn with_compare_delay(mut self, ms: u64) -> Self {
        self.compare_delay_ms = ms;
        self
    }

    /// Set the reveal policy.
    #[must_use]
    pub fn with_reveal_policy(mut self, policy: RevealPolicy) -> Self {
        self.reveal_policy = policy;
        self
    }

    /// Set a fixed deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject timing values the countdown cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.turn_duration_secs == 0 {
            return Err(ValidationError::TurnDuration);
        }
        if self.tick_interval_ms == 0 {
            return Err(ValidationError::TickInterval);
        }
        Ok(())
    }

    /// Load config from environment or use defaults.
    ///
    /// Reads `PAIRS_TURN_SECONDS`, `PAIRS_TICK_MS`, `PAIRS_COMPARE_DELAY_MS`,
    /// `PAIRS_REVEAL_POLICY` and `PAIRS_SEED`. Unparseable values are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("PAIRS_TURN_SECONDS") {
            match raw.parse::<u32>() {
                Ok(secs) if secs > 0 => config.turn_duration_secs = secs,
                _ => tracing::warn!("Invalid PAIRS_TURN_SECONDS '{}', using default", raw),
            }
        }

        if let Some(raw) = lookup("PAIRS_TICK_MS") {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick_interval_ms = ms,
                _ => tracing::warn!("Invalid PAIRS_TICK_MS '{}', using default", raw),
            }
        }

        if let Some(raw) = lookup("PAIRS_COMPARE_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.compare_delay_ms = ms,
                Err(_) => tracing::warn!("Invalid PAIRS_COMPARE_DELAY_MS '{}', using default", raw),
            }
        }

        if let Some(raw) = lookup("PAIRS_REVEAL_POLICY") {
            match raw.parse::<RevealPolicy>() {
                Ok(policy) => config.reveal_policy = policy,
                Err(e) => tracing::warn!("{}, using default", e),
            }
        }

        if let Some(raw) = lookup("PAIRS_SEED") {
            match raw.parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => tracing::warn!("Invalid PAIRS_SEED '{}', ignoring", raw),
            }
        }

        config
    }
}
