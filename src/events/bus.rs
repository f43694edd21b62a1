//! Observer registry for game events.
//!
//! Listeners are plain closures. They run synchronously, in subscription
//! order, on the thread that caused the event. A listener only ever sees
//! `&GameEvent`, so it cannot reach back into the controller.

use std::cell::RefCell;
use std::rc::Rc;

use super::event::GameEvent;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Fan-out of events to subscribed listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
    emitted: u64,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: GameEvent) {
        tracing::trace!(event = event.name(), listeners = self.listeners.len(), "emit");
        self.emitted += 1;
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total events emitted over the bus's lifetime.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}

/// Shareable event recorder.
///
/// Subscribe `log.listener()` and read back what was emitted.
///
/// ```
/// use rust_pairs::events::{EventBus, EventLog, GameEvent};
///
/// let log = EventLog::new();
/// let mut bus = EventBus::new();
/// bus.subscribe(log.listener());
///
/// bus.emit(GameEvent::TimerTick { time_remaining: 9 });
/// assert_eq!(log.names(), vec!["timerTick"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends to this log.
    pub fn listener(&self) -> impl FnMut(&GameEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    /// Copy of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Names of recorded events, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(GameEvent::name).collect()
    }

    /// How many recorded events have this name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name() == name).count()
    }

    /// Most recent event with this name.
    #[must_use]
    pub fn last(&self, name: &str) -> Option<GameEvent> {
        self.events.borrow().iter().rev().find(|e| e.name() == name).cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
