use crate::ModuleError;

/// A unit of behavior with an enable/disable lifecycle.
///
/// Modules are constructed with a cloned [`ModuleContext`] and keep whatever
/// listener handles they register. The registry guarantees `enable` and
/// `disable` are each called once per cycle, never concurrently with
/// dispatch.
///
/// [`ModuleContext`]: crate::ModuleContext
pub trait Module: Send {
    /// Unique name, also used as the listener owner tag and config key.
    fn name(&self) -> &'static str;

    /// Subscribe this module's listeners.
    ///
    /// On error the module must not be left half-enabled; the registry sweeps
    /// any listeners that appeared under [`Module::name`] while this ran.
    /// Listeners other code registered under the same tag are left alone.
    fn enable(&mut self) -> Result<(), ModuleError>;

    /// Unsubscribe every listener registered by `enable`.
    fn disable(&mut self);
}

/// Lifecycle state tracked by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Registered, never enabled
    Registered,
    /// Listeners live
    Enabled,
    /// Disabled by shutdown, reload or configuration
    Disabled,
    /// `enable` returned an error
    Failed,
}

impl ModuleState {
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}
