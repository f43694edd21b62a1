//! Per-turn countdown.
//!
//! The timer owns the remaining whole seconds and at most one scheduled
//! tick on the controller's timeline. It decrements only when a tick it
//! scheduled fires, so the remaining value survives `stop`/`start` pairs
//! untouched.

use serde::{Deserialize, Serialize};

use super::timeline::{Task, TaskId, Timeline};

/// Result of a fired tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown continues with this many seconds left.
    Remaining(u32),
    /// Countdown hit zero.
    Expired,
    /// The tick was not the one this timer is waiting for.
    Stale,
}

/// Cancellable countdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTimer {
    duration_secs: u32,
    remaining_secs: u32,
    interval_ms: u64,
    #[serde(skip)]
    pending: Option<TaskId>,
}

impl TurnTimer {
    /// Create a stopped timer with a full countdown.
    #[must_use]
    pub fn new(duration_secs: u32, interval_ms: u64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            interval_ms,
            pending: None,
        }
    }

    /// Seconds left this turn.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining_secs
    }

    /// Full turn length in seconds.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration_secs
    }

    /// Whether a tick is scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule the next tick one interval after `now_ms`. No-op if running.
    pub fn start(&mut self, timeline: &mut Timeline, now_ms: u64, generation: u64) {
        if self.pending.is_none() {
            let id = timeline.schedule(now_ms + self.interval_ms, generation, Task::TimerTick);
            self.pending = Some(id);
        }
    }

    /// Cancel the scheduled tick. The remaining time is kept.
    pub fn stop(&mut self, timeline: &mut Timeline) {
        if let Some(id) = self.pending.take() {
            timeline.cancel(id);
        }
    }

    /// Restore the full countdown. Does not start or stop the timer.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
    }

    /// Forget any scheduled tick without touching a timeline.
    ///
    /// Used after the timeline that held the tick has been cleared.
    pub fn detach(&mut self) {
        self.pending = None;
    }

    /// Consume a fired tick and decrement.
    ///
    /// The caller re-arms with `start` if the countdown should continue.
    pub fn on_tick(&mut self, id: TaskId) -> TickOutcome {
        if self.pending != Some(id) {
            return TickOutcome::Stale;
        }
        self.pending = None;
        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Remaining(self.remaining_secs)
        }
    }
}
