//! Respawn-anchor teleport module.
//!
//! - Spawn points can only be set programmatically
//! - Every respawn goes to the spawn of the player's current world
//! - Using a fully charged respawn anchor opens the teleport menu instead
//! - Placed respawn anchors are charged fully right away
//!
//! Bed entry is subscribed but left to vanilla.

pub mod handlers;
mod settings;

use std::sync::Arc;

use tracing::info;
use tweaks_event::{Priority, Subscriptions};
use tweaks_host::{
    BedEnterEvent, BlockInteractEvent, BlockPlaceEvent, PlayerRespawnEvent, SpawnSetEvent,
};
use tweaks_module::{Module, ModuleContext, ModuleError};

pub use settings::TeleportSettings;

pub struct TeleportModule {
    ctx: ModuleContext,
    subs: Subscriptions,
}

impl TeleportModule {
    pub const NAME: &'static str = "teleport";

    pub fn new(ctx: ModuleContext) -> Self {
        let subs = Subscriptions::new(ctx.bus().clone(), Self::NAME);
        Self { ctx, subs }
    }
}

impl Module for TeleportModule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn enable(&mut self) -> Result<(), ModuleError> {
        // Both checks run before anything is subscribed
        let menu = self.ctx.require_teleport_menu(Self::NAME)?;
        let settings: Arc<TeleportSettings> = Arc::new(self.ctx.settings(Self::NAME)?);

        // Earliest tier, ahead of anything that would persist the spawn point
        self.subs
            .listen::<SpawnSetEvent, _>(Priority::Lowest, handlers::guard_spawn_set);

        let host = Arc::clone(self.ctx.host());
        self.subs
            .listen(Priority::Normal, move |event: &mut PlayerRespawnEvent| {
                handlers::redirect_respawn(host.as_ref(), event);
            });

        let host = Arc::clone(self.ctx.host());
        self.subs
            .listen(Priority::Normal, move |event: &mut BlockInteractEvent| {
                handlers::override_anchor_interact(host.as_ref(), menu.as_ref(), event);
            });

        let host = Arc::clone(self.ctx.host());
        self.subs
            .listen(Priority::Normal, move |event: &mut BlockPlaceEvent| {
                handlers::charge_placed_anchor(host.as_ref(), &settings, event);
            });

        self.subs
            .listen::<BedEnterEvent, _>(Priority::Normal, handlers::bed_enter);

        info!(
            "Teleport module listening on {} event type(s)",
            self.subs.len()
        );
        Ok(())
    }

    fn disable(&mut self) {
        let removed = self.subs.clear();
        info!("Teleport module released {} listener(s)", removed);
    }
}
