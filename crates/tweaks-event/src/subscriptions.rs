//! Per-owner listener bookkeeping.

use tracing::debug;

use crate::{Event, EventBus, ListenerId, Priority};

/// Listener handles registered by one owner.
///
/// A module keeps one of these, registers through it while enabling, and
/// calls [`Subscriptions::clear`] while disabling.
#[derive(Debug)]
pub struct Subscriptions {
    bus: EventBus,
    owner: &'static str,
    ids: Vec<ListenerId>,
}

impl Subscriptions {
    /// Create an empty set bound to `bus` under the `owner` tag.
    #[must_use]
    pub fn new(bus: EventBus, owner: &'static str) -> Self {
        Self {
            bus,
            owner,
            ids: Vec::new(),
        }
    }

    /// Register a listener and remember its handle.
    pub fn listen<E, F>(&mut self, priority: Priority, handler: F) -> ListenerId
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let id = self.bus.subscribe(self.owner, priority, handler);
        self.ids.push(id);
        id
    }

    /// Unregister every listener registered through this set.
    ///
    /// Returns the number of listeners that were still registered.
    pub fn clear(&mut self) -> usize {
        let removed = self
            .ids
            .drain(..)
            .filter(|id| self.bus.unsubscribe(*id))
            .count();

        debug!("Cleared {} listener(s) for {}", removed, self.owner);
        removed
    }

    /// Number of handles currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no handles are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
