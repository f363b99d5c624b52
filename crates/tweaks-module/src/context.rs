use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tweaks_event::EventBus;
use tweaks_host::{HostServices, TeleportMenu};

use crate::{ConfigError, ModuleError, TweaksConfig};

/// Host binding handed to every module at construction.
///
/// Cheap to clone; all clones share the same bus, host services and
/// configuration. Tests build one around a `MemoryHost`.
#[derive(Clone)]
pub struct ModuleContext {
    bus: EventBus,
    host: Arc<dyn HostServices>,
    teleport_menu: Option<Arc<dyn TeleportMenu>>,
    config: Arc<RwLock<TweaksConfig>>,
}

impl core::fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleContext")
            .field("bus", &self.bus)
            .field("teleport_menu", &self.teleport_menu.is_some())
            .finish_non_exhaustive()
    }
}

impl ModuleContext {
    pub fn new(bus: EventBus, host: Arc<dyn HostServices>) -> Self {
        Self {
            bus,
            host,
            teleport_menu: None,
            config: Arc::new(RwLock::new(TweaksConfig::default())),
        }
    }

    #[must_use]
    pub fn with_teleport_menu(mut self, menu: Arc<dyn TeleportMenu>) -> Self {
        self.teleport_menu = Some(menu);
        self
    }

    #[must_use]
    pub fn with_config(self, config: TweaksConfig) -> Self {
        *self.config.write() = config;
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn host(&self) -> &Arc<dyn HostServices> {
        &self.host
    }

    pub fn teleport_menu(&self) -> Option<&Arc<dyn TeleportMenu>> {
        self.teleport_menu.as_ref()
    }

    /// The teleport menu, or a fatal enable error naming `module`.
    pub fn require_teleport_menu(
        &self,
        module: &'static str,
    ) -> Result<Arc<dyn TeleportMenu>, ModuleError> {
        self.teleport_menu
            .clone()
            .ok_or(ModuleError::MissingCapability {
                module,
                capability: "teleport menu",
            })
    }

    pub fn is_enabled(&self, module: &str) -> bool {
        self.config.read().is_enabled(module)
    }

    /// Current settings for `module`, read at call time.
    pub fn settings<T>(&self, module: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        self.config.read().settings(module)
    }

    pub(crate) fn replace_config(&self, config: TweaksConfig) {
        *self.config.write() = config;
    }
}
