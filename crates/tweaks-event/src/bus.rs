//! The event bus: registration, removal and synchronous dispatch.

use core::any::{Any, TypeId};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use tracing::{debug, error};

use crate::listener::{ListenerFn, ListenerId, ListenerInfo};
use crate::{Event, Priority};

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Listeners that ran to completion
    pub delivered: usize,
    /// Listeners that panicked and were skipped
    pub panicked: usize,
}

/// Inner bus state (behind Arc<RwLock>).
#[derive(Default)]
struct EventBusInner {
    /// Registered listeners by event type, sorted by (priority, id)
    listeners: HashMap<TypeId, Vec<ListenerInfo>>,
    /// IDs that are currently registered
    live: HashSet<ListenerId>,
    /// Next listener ID
    next_listener_id: u64,
}

/// Event bus handle - cloneable wrapper around shared state.
///
/// Every clone talks to the same listener table, so the registry, the modules
/// and the host can each hold one.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<EventBusInner>>,
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("EventBus")
            .field("event_types", &inner.listeners.len())
            .field("listeners", &inner.live.len())
            .finish()
    }
}

impl EventBus {
    /// Create a new event bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event type.
    ///
    /// The listener is live as soon as this returns. `owner` tags the listener
    /// so it can be swept with [`EventBus::unsubscribe_owner`].
    pub fn subscribe<E, F>(&self, owner: &'static str, priority: Priority, handler: F) -> ListenerId
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let (type_id, mut info) = ListenerInfo::new::<E, F>(owner, priority, handler);

        let mut inner = self.inner.write();
        let id = ListenerId::new(inner.next_listener_id);
        inner.next_listener_id += 1;
        info.id = id;

        debug!(
            "Subscribed listener {} for {} (owner: {}, priority: {:?})",
            id.raw(),
            info.event_name,
            owner,
            priority
        );

        let list = inner.listeners.entry(type_id).or_default();
        // IDs grow monotonically, so inserting after the last entry of the same
        // tier keeps registration order within a tier.
        let index = list.partition_point(|existing| existing.priority <= priority);
        list.insert(index, info);
        inner.live.insert(id);

        id
    }

    /// Remove a listener.
    ///
    /// Returns `false` if the ID was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.write();
        if !inner.live.remove(&id) {
            return false;
        }

        for list in inner.listeners.values_mut() {
            if let Some(index) = list.iter().position(|info| info.id == id) {
                let info = list.remove(index);
                debug!(
                    "Unsubscribed listener {} for {} (owner: {})",
                    id.raw(),
                    info.event_name,
                    info.owner
                );
                break;
            }
        }
        inner.listeners.retain(|_, list| !list.is_empty());

        true
    }

    /// Remove every listener registered under `owner`.
    ///
    /// Returns the number of listeners removed.
    pub fn unsubscribe_owner(&self, owner: &str) -> usize {
        let mut inner = self.inner.write();
        let mut removed = Vec::new();

        for list in inner.listeners.values_mut() {
            list.retain(|info| {
                if info.owner == owner {
                    removed.push(info.id);
                    false
                } else {
                    true
                }
            });
        }
        inner.listeners.retain(|_, list| !list.is_empty());

        for id in &removed {
            inner.live.remove(id);
        }

        removed.len()
    }

    /// Deliver an event to every listener for its type.
    ///
    /// Delivery is synchronous: every listener has returned when this returns.
    /// The listener list is snapshotted and the lock released before any
    /// listener runs, so listeners may subscribe or unsubscribe freely. A
    /// listener removed during dispatch is not invoked afterwards.
    pub fn dispatch<E: Event>(&self, event: &mut E) -> DispatchOutcome {
        let snapshot: Vec<(ListenerId, &'static str, ListenerFn)> = {
            let inner = self.inner.read();
            match inner.listeners.get(&TypeId::of::<E>()) {
                Some(list) => list
                    .iter()
                    .map(|info| (info.id, info.owner, Arc::clone(&info.callback)))
                    .collect(),
                None => return DispatchOutcome::default(),
            }
        };

        let mut outcome = DispatchOutcome::default();

        for (id, owner, callback) in snapshot {
            if !self.is_live(id) {
                continue;
            }

            let erased: &mut dyn Any = &mut *event;
            match catch_unwind(AssertUnwindSafe(|| callback(erased))) {
                Ok(()) => outcome.delivered += 1,
                Err(panic) => {
                    outcome.panicked += 1;
                    error!(
                        "Listener {} (owner: {}) panicked while handling {}: {}",
                        id.raw(),
                        owner,
                        <E as Event>::name(),
                        panic_message(panic.as_ref())
                    );
                }
            }
        }

        outcome
    }

    /// Check whether a listener is still registered.
    #[must_use]
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.inner.read().live.contains(&id)
    }

    /// Number of listeners registered for an event type.
    #[must_use]
    pub fn listener_count<E: Event>(&self) -> usize {
        self.inner
            .read()
            .listeners
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Number of listeners registered under an owner tag.
    #[must_use]
    pub fn owner_count(&self, owner: &str) -> usize {
        self.inner
            .read()
            .listeners
            .values()
            .flatten()
            .filter(|info| info.owner == owner)
            .count()
    }

    /// IDs of the listeners currently registered under an owner tag.
    #[must_use]
    pub fn owner_listeners(&self, owner: &str) -> Vec<ListenerId> {
        self.inner
            .read()
            .listeners
            .values()
            .flatten()
            .filter(|info| info.owner == owner)
            .map(|info| info.id)
            .collect()
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.inner.read().live.len()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
