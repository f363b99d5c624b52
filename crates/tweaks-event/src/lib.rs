#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::redundant_pub_crate)]

//! Tweaks Event System
//!
//! Synchronous, typed publish/subscribe for host events.
//!
//! # Core Concept: Listeners per Event Type
//!
//! Every event is a plain Rust value. Listeners are closures registered for
//! one concrete event type and receive `&mut E`, so they can cancel the event
//! or rewrite its overridable fields before the host acts on it.
//!
//! # Ordering
//!
//! - Listeners of one event type run by [`Priority`] tier, lowest first
//! - Within a tier, listeners run in registration order
//! - Different event types are independent of each other
//!
//! # Isolation
//!
//! A listener that panics is logged and skipped; the remaining listeners for
//! the same event still run.
//!
//! # Example
//!
//! ```ignore
//! let bus = EventBus::new();
//!
//! let id = bus.subscribe("spawn-guard", Priority::Lowest, |event: &mut SpawnSet| {
//!     event.set_cancelled(true);
//! });
//!
//! let mut event = SpawnSet::default();
//! bus.dispatch(&mut event);
//! assert!(event.is_cancelled());
//!
//! bus.unsubscribe(id);
//! ```

mod bus;
mod event;
mod listener;
mod priority;
mod subscriptions;

pub use bus::{DispatchOutcome, EventBus};
pub use event::{Cancellable, Event};
pub use listener::ListenerId;
pub use priority::Priority;
pub use subscriptions::Subscriptions;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Cancellable, DispatchOutcome, Event, EventBus, ListenerId, Priority, Subscriptions,
    };
}
