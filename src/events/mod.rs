//! Event stream: the controller's only output channel.
//!
//! Presentation, persistence and leaderboard glue all feed from here.
//!
//! - [`GameEvent`]: One variant per observable change, with snapshot payloads
//! - [`EventBus`]: Ordered fan-out to subscribed closures
//! - [`EventLog`]: Recorder listener for tests and tooling

mod bus;
mod event;

pub use bus::{EventBus, EventLog, ListenerId};
pub use event::GameEvent;
