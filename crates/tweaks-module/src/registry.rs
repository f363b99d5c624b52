use tracing::{debug, error, info, warn};
use tweaks_event::{EventBus, ListenerId};

use crate::{Module, ModuleContext, ModuleError, ModuleState, TweaksConfig};

/// A registered module and its lifecycle state
struct RegisteredModule {
    module: Box<dyn Module>,
    state: ModuleState,
    /// Listeners that appeared under the module's name while it enabled
    listeners: Vec<ListenerId>,
}

impl RegisteredModule {
    fn name(&self) -> &'static str {
        self.module.name()
    }

    /// Enable the module, sweeping partial subscriptions on failure
    fn start(&mut self, bus: &EventBus) -> Result<(), ModuleError> {
        if self.state.is_enabled() {
            return Ok(());
        }

        let name = self.name();
        debug!("Enabling module '{}'", name);

        // Listeners already tagged with this name belong to someone else
        let foreign = bus.owner_listeners(name);
        let result = self.module.enable();
        self.listeners = bus
            .owner_listeners(name)
            .into_iter()
            .filter(|id| !foreign.contains(id))
            .collect();

        match result {
            Ok(()) => {
                self.state = ModuleState::Enabled;
                info!(
                    "Enabled module '{}' ({} listener(s))",
                    name,
                    self.listeners.len()
                );
                Ok(())
            }
            Err(e) => {
                let swept = self.sweep(bus);
                if swept > 0 {
                    debug!("Swept {} partial listener(s) of '{}'", swept, name);
                }
                self.state = ModuleState::Failed;
                Err(e)
            }
        }
    }

    /// Disable the module and sweep anything it left behind
    fn stop(&mut self, bus: &EventBus) {
        if !self.state.is_enabled() {
            return;
        }

        let name = self.name();
        debug!("Disabling module '{}'", name);

        self.module.disable();

        let dangling = self.sweep(bus);
        if dangling > 0 {
            warn!(
                "Module '{}' left {} listener(s) registered after disable",
                name, dangling
            );
        }

        self.state = ModuleState::Disabled;
        info!("Disabled module '{}'", name);
    }

    /// Unsubscribe the listeners recorded while enabling.
    ///
    /// Returns how many were still registered.
    fn sweep(&mut self, bus: &EventBus) -> usize {
        self.listeners
            .drain(..)
            .filter(|id| bus.unsubscribe(*id))
            .count()
    }
}

/// Owns the set of modules and drives their lifecycle.
///
/// Modules are enabled in registration order and disabled in reverse order.
/// All calls must happen on the thread that dispatches events.
pub struct ModuleRegistry {
    ctx: ModuleContext,
    modules: Vec<RegisteredModule>,
}

impl ModuleRegistry {
    pub fn new(ctx: ModuleContext) -> Self {
        Self {
            ctx,
            modules: Vec::new(),
        }
    }

    /// Register a module. It stays inactive until enabled.
    ///
    /// A second module with an already registered name is ignored.
    pub fn register<M: Module + 'static>(&mut self, module: M) -> &mut Self {
        let name = module.name();
        if self.position(name).is_some() {
            warn!("Module '{}' is already registered, ignoring duplicate", name);
            return self;
        }

        debug!("Registered module '{}'", name);
        self.modules.push(RegisteredModule {
            module: Box::new(module),
            state: ModuleState::Registered,
            listeners: Vec::new(),
        });
        self
    }

    /// Enable every registered module that configuration switches on.
    ///
    /// A module whose `enable` fails is logged and marked
    /// [`ModuleState::Failed`]; the others are still enabled. Returns the
    /// number of modules enabled by this call.
    pub fn enable_all(&mut self) -> usize {
        let mut enabled = 0;

        for entry in &mut self.modules {
            if entry.state.is_enabled() {
                continue;
            }

            if !self.ctx.is_enabled(entry.name()) {
                info!("Module '{}' is disabled in configuration", entry.name());
                entry.state = ModuleState::Disabled;
                continue;
            }

            match entry.start(self.ctx.bus()) {
                Ok(()) => enabled += 1,
                Err(e) => error!("Failed to enable module '{}': {}", entry.name(), e),
            }
        }

        enabled
    }

    /// Enable one module by name.
    ///
    /// Returns `Ok(false)` if configuration switches the module off.
    pub fn enable(&mut self, name: &str) -> Result<bool, ModuleError> {
        let index = self
            .position(name)
            .ok_or_else(|| ModuleError::NotFound(name.to_owned()))?;

        if !self.ctx.is_enabled(name) {
            return Ok(false);
        }

        self.modules[index].start(self.ctx.bus())?;
        Ok(true)
    }

    /// Disable one module by name.
    pub fn disable(&mut self, name: &str) -> Result<(), ModuleError> {
        let index = self
            .position(name)
            .ok_or_else(|| ModuleError::NotFound(name.to_owned()))?;

        self.modules[index].stop(self.ctx.bus());
        Ok(())
    }

    /// Disable every enabled module in reverse registration order.
    ///
    /// Returns the number of modules disabled by this call.
    pub fn disable_all(&mut self) -> usize {
        let mut disabled = 0;

        for entry in self.modules.iter_mut().rev() {
            if entry.state.is_enabled() {
                entry.stop(self.ctx.bus());
                disabled += 1;
            }
        }

        disabled
    }

    /// Disable everything, swap in new configuration, enable again.
    ///
    /// Returns the number of modules enabled afterwards.
    pub fn reload(&mut self, config: TweaksConfig) -> usize {
        info!("Reloading {} module(s)", self.modules.len());

        self.disable_all();
        self.ctx.replace_config(config);

        let enabled = self.enable_all();
        info!("Reloaded, {} module(s) enabled", enabled);
        enabled
    }

    pub fn state(&self, name: &str) -> Option<ModuleState> {
        self.position(name).map(|index| self.modules[index].state)
    }

    /// Names of currently enabled modules, in registration order.
    pub fn loaded_modules(&self) -> Vec<&'static str> {
        self.modules
            .iter()
            .filter(|entry| entry.state.is_enabled())
            .map(RegisteredModule::name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|entry| entry.name() == name)
    }
}

impl Drop for ModuleRegistry {
    fn drop(&mut self) {
        self.disable_all();
    }
}
