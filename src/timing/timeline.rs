//! Single ordered timeline of delayed effects.
//!
//! The controller has exactly two kinds of deferred work: the comparison
//! of a revealed pair and the countdown tick. Both are queued here with an
//! absolute due time and fired in `(due, scheduling order)` order, so no
//! two effects ever run concurrently.
//!
//! Every entry carries the generation of the game that scheduled it. A task
//! whose generation no longer matches the live game is stale and must be
//! dropped by the caller.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// Handle to a scheduled task, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

/// A revealed pair waiting to be compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingComparison {
    pub first: CardId,
    pub second: CardId,
    /// The player who revealed the pair.
    pub player: PlayerId,
}

/// Deferred work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Resolve a revealed pair.
    Compare(PendingComparison),
    /// Decrement the turn countdown.
    TimerTick,
}

/// A task with its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_ms: u64,
    pub generation: u64,
    pub task: Task,
}

/// Ordered queue of scheduled tasks.
///
/// ```
/// use rust_pairs::timing::{Task, Timeline};
///
/// let mut timeline = Timeline::new();
/// let late = timeline.schedule(2000, 1, Task::TimerTick);
/// let early = timeline.schedule(1000, 1, Task::TimerTick);
///
/// assert!(timeline.pop_due(500).is_none());
/// assert_eq!(timeline.pop_due(5000).unwrap().id, early);
/// assert_eq!(timeline.pop_due(5000).unwrap().id, late);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    /// Sorted by (due_ms, id).
    entries: Vec<ScheduledTask>,
    next_id: u64,
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, generation: u64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let entry = ScheduledTask {
            id,
            due_ms,
            generation,
            task,
        };
        let pos = self
            .entries
            .partition_point(|e| (e.due_ms, e.id) <= (due_ms, id));
        self.entries.insert(pos, entry);
        id
    }

    /// Remove a task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        match self.entries.first() {
            Some(first) if first.due_ms <= now_ms => Some(self.entries.remove(0)),
            _ => None,
        }
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.entries.first().map(|e| e.due_ms)
    }

    /// Whether a task is still queued.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of queued comparisons.
    #[must_use]
    pub fn pending_comparisons(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.task, Task::Compare(_)))
            .count()
    }

    /// Drop every queued task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(a: u32, b: u32) -> Task {
        Task::Compare(PendingComparison {
            first: CardId::new(a),
            second: CardId::new(b),
            player: PlayerId::new(0),
        })
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(300, 0, Task::TimerTick);
        timeline.schedule(100, 0, compare(0, 1));
        timeline.schedule(200, 0, Task::TimerTick);

        let order: Vec<u64> = std::iter::from_fn(|| timeline.pop_due(1000))
            .map(|e| e.due_ms)
            .collect();
        assert_eq!(order, vec![100, 200, 300]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut timeline = Timeline::new();
        let a = timeline.schedule(100, 0, Task::TimerTick);
        let b = timeline.schedule(100, 0, compare(0, 1));
        let c = timeline.schedule(100, 0, Task::TimerTick);

        assert_eq!(timeline.pop_due(100).unwrap().id, a);
        assert_eq!(timeline.pop_due(100).unwrap().id, b);
        assert_eq!(timeline.pop_due(100).unwrap().id, c);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timeline = Timeline::new();
        timeline.schedule(1000, 0, Task::TimerTick);

        assert!(timeline.pop_due(999).is_none());
        assert_eq!(timeline.next_due(), Some(1000));
        assert!(timeline.pop_due(1000).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut timeline = Timeline::new();
        let tick = timeline.schedule(100, 0, Task::TimerTick);
        let cmp = timeline.schedule(200, 0, compare(2, 3));

        assert!(timeline.cancel(tick));
        assert!(!timeline.cancel(tick));
        assert!(!timeline.contains(tick));
        assert!(timeline.contains(cmp));
        assert_eq!(timeline.pending_comparisons(), 1);

        assert_eq!(timeline.pop_due(1000).unwrap().id, cmp);
    }

    #[test]
    fn test_clear() {
        let mut timeline = Timeline::new();
        timeline.schedule(100, 0, Task::TimerTick);
        timeline.schedule(100, 0, compare(0, 1));
        assert_eq!(timeline.len(), 2);

        timeline.clear();
        assert!(timeline.is_empty());
        assert!(timeline.pop_due(u64::MAX).is_none());
    }
}
