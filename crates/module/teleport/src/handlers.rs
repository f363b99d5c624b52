//! Event handlers of the teleport module.
//!
//! Each handler is a plain function over the event and the host services it
//! needs, so it can be tested without a bus. None of them returns an error:
//! unexpected block data is logged and the handler's effect is skipped.

use tracing::{debug, warn};
use tweaks_event::Cancellable;
use tweaks_host::{
    BedEnterEvent, BlockData, BlockInteractEvent, BlockPlaceEvent, HostServices, InteractAction,
    Material, PlayerRespawnEvent, SpawnCause, SpawnSetEvent, TeleportMenu,
};

use crate::TeleportSettings;

/// Only programmatic spawn changes go through.
pub fn guard_spawn_set(event: &mut SpawnSetEvent) {
    if event.cause == SpawnCause::Programmatic {
        return;
    }

    debug!(
        "Refusing spawn change for {} (cause: {:?})",
        event.player, event.cause
    );
    event.set_cancelled(true);
}

/// Respawn at the spawn of the world the player is in.
///
/// A world without a spawn leaves the host's fallback in place.
pub fn redirect_respawn(host: &dyn HostServices, event: &mut PlayerRespawnEvent) {
    let world = event.player_location.world;
    match host.spawn_location(world) {
        Some(spawn) => event.respawn_location = spawn,
        None => debug!("World {:?} has no spawn, keeping host respawn", world),
    }
}

/// Open the teleport menu instead of using a fully charged anchor.
pub fn override_anchor_interact(
    host: &dyn HostServices,
    menu: &dyn TeleportMenu,
    event: &mut BlockInteractEvent,
) {
    let Some(clicked) = event.clicked else {
        return;
    };
    if clicked.material != Material::RespawnAnchor {
        return;
    }

    let qualifying = event.action == InteractAction::RightClickBlock
        || (event.is_empty_handed() && !event.sneaking);
    if !qualifying {
        return;
    }

    let Some(data) = host.block_data(clicked.pos) else {
        warn!("Clicked anchor at {} has no block data", clicked.pos);
        return;
    };
    let Some(anchor) = data.as_respawn_anchor() else {
        warn!(
            "Clicked anchor at {} holds {:?} data, skipping",
            clicked.pos,
            data.material()
        );
        return;
    };

    // Charging an anchor that is not full stays vanilla
    if !anchor.is_fully_charged() {
        return;
    }

    event.set_cancelled(true);
    menu.open(event.player, clicked.pos);
}

/// Fully charge a freshly placed anchor and confirm it to the player.
///
/// Runs on every qualifying placement. An anchor that is already full is
/// rewritten unchanged and the confirmation repeats.
pub fn charge_placed_anchor(
    host: &dyn HostServices,
    settings: &TeleportSettings,
    event: &BlockPlaceEvent,
) {
    if event.is_cancelled() || !event.can_build {
        return;
    }
    if event.material != Material::RespawnAnchor {
        return;
    }

    let charged = host.update_block_data(event.placed, &mut |data: &mut BlockData| {
        match data.as_respawn_anchor_mut() {
            Some(anchor) => {
                anchor.charge_fully();
                true
            }
            None => false,
        }
    });

    match charged {
        Ok(true) => {}
        Ok(false) => {
            warn!("Placed anchor at {} holds no anchor data", event.placed);
            return;
        }
        Err(e) => {
            warn!("Could not charge anchor at {}: {}", event.placed, e);
            return;
        }
    }

    host.play_sound(event.placed.to_location(), &settings.anchor_placed_sound);
    if !settings.anchor_placed_message.is_empty() {
        host.send_message(event.player, &settings.anchor_placed_message);
    }
}

/// Beds keep vanilla behavior.
pub fn bed_enter(_event: &mut BedEnterEvent) {}
