//! Game controller: the orchestrator that owns the game state, schedules
//! delayed effects and emits events.

mod game;

pub use game::GameController;
