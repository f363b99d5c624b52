//! Module framework for tweaks
//!
//! A module is a self-contained unit of behavior that subscribes to host
//! events while enabled. This crate provides:
//!
//! - [`Module`] - the enable/disable contract every module implements
//! - [`ModuleContext`] - the host binding injected into each module
//! - [`ModuleRegistry`] - enables modules at startup and disables them in
//!   reverse order at shutdown
//! - [`TweaksConfig`] - JSON configuration (enabled modules, per-module settings)
//!
//! # Lifecycle
//!
//! ```text
//! construct(ctx) -> enable() -> [events dispatched] -> disable()
//! ```
//!
//! `enable` and `disable` are called exactly once per cycle, on the thread
//! that dispatches events, so a module never sees an event before `enable`
//! has returned or after `disable` has returned.
//!
//! # Example
//!
//! ```ignore
//! let ctx = ModuleContext::new(bus, host).with_teleport_menu(menu);
//! let mut registry = ModuleRegistry::new(ctx.clone());
//! registry.register(TeleportModule::new(ctx));
//! registry.enable_all();
//! // ... server runs ...
//! registry.disable_all();
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod module;
pub mod registry;

pub use config::TweaksConfig;
pub use context::ModuleContext;
pub use error::{ConfigError, ModuleError};
pub use module::{Module, ModuleState};
pub use registry::ModuleRegistry;
