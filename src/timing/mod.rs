//! Time: clocks, the ordered timeline of delayed effects, and the turn timer.
//!
//! ## Key Types
//!
//! - [`Clock`]: Injectable millisecond time source
//! - [`ManualClock`]: Virtual time for deterministic tests
//! - [`Timeline`]: Ordered queue of comparisons and ticks
//! - [`TurnTimer`]: Cancellable per-turn countdown
//!
//! ## Execution Model
//!
//! Everything runs on the caller's thread. Delayed effects are entries on
//! the timeline; `GameController::poll` fires the ones that are due
//! according to the clock, one at a time, in order.

mod clock;
mod timeline;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timeline::{PendingComparison, ScheduledTask, Task, TaskId, Timeline};
pub use timer::{TickOutcome, TurnTimer};
