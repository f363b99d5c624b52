//! Event marker and cancellation traits.

use core::any::TypeId;

/// Marker trait for event values.
///
/// Any type implementing this can be dispatched via [`EventBus::dispatch`].
///
/// [`EventBus::dispatch`]: crate::EventBus::dispatch
pub trait Event: Send + 'static {
    /// Get the TypeId of this event type.
    fn type_id() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Get the event type name for logging.
    fn name() -> &'static str {
        core::any::type_name::<Self>()
    }
}

// Blanket implementation: any Send + 'static type can be an event
impl<T: Send + 'static> Event for T {}

/// Events whose default host handling can be suppressed by a listener.
///
/// The flag is read by the host after dispatch returns. Listeners may also
/// read it to skip work for events an earlier tier already cancelled.
pub trait Cancellable {
    /// Whether a listener has cancelled this event.
    fn is_cancelled(&self) -> bool;

    /// Set or clear the cancelled flag.
    fn set_cancelled(&mut self, cancelled: bool);
}
