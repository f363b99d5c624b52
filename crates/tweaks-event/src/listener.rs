//! Listener registration records.

use core::any::{Any, TypeId};
use std::sync::Arc;

use crate::{Event, Priority};

/// Unique identifier for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Type-erased listener function.
///
/// Shared so dispatch can snapshot the listener list and release the lock
/// before invoking anything.
pub(crate) type ListenerFn = Arc<dyn Fn(&mut dyn Any) + Send + Sync>;

/// Metadata for a registered listener.
pub(crate) struct ListenerInfo {
    /// Unique ID
    pub id: ListenerId,
    /// Owner tag (module name) used for sweeps and logging
    pub owner: &'static str,
    /// Tier this listener runs in
    pub priority: Priority,
    /// Event type name for debugging
    pub event_name: &'static str,
    /// The listener function (type-erased)
    pub callback: ListenerFn,
}

impl core::fmt::Debug for ListenerInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerInfo")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("priority", &self.priority)
            .field("event_name", &self.event_name)
            .finish_non_exhaustive()
    }
}

impl ListenerInfo {
    /// Wrap a typed handler into a type-erased listener.
    ///
    /// The ID is assigned by the bus during registration.
    pub fn new<E, F>(owner: &'static str, priority: Priority, handler: F) -> (TypeId, Self)
    where
        E: Event,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let callback: ListenerFn = Arc::new(move |event: &mut dyn Any| {
            if let Some(event) = event.downcast_mut::<E>() {
                handler(event);
            }
        });

        let info = Self {
            id: ListenerId::new(0),
            owner,
            priority,
            event_name: <E as Event>::name(),
            callback,
        };

        (TypeId::of::<E>(), info)
    }
}
