//! Integration tests for the teleport module, driven through the event bus

use std::sync::Arc;

use module_teleport::{TeleportModule, TeleportSettings};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tweaks_event::prelude::*;
use tweaks_host::{
    BedEnterEvent, BlockData, BlockInteractEvent, BlockPlaceEvent, BlockPos, ClickedBlock,
    HostServices, InteractAction, Location, Material, MemoryHost, PlayerId, PlayerRespawnEvent,
    RespawnAnchor, SpawnCause, SpawnSetEvent, WorldId,
};
use tweaks_module::{ModuleContext, ModuleError, ModuleRegistry, ModuleState, TweaksConfig};

const ANCHOR: BlockPos = BlockPos::new(WorldId::OVERWORLD, -20, 68, 31);
const FULL: u8 = RespawnAnchor::DEFAULT_MAXIMUM_CHARGES;

struct Server {
    host: Arc<MemoryHost>,
    ctx: ModuleContext,
    registry: ModuleRegistry,
    player: PlayerId,
}

impl Server {
    fn start(config: TweaksConfig) -> Self {
        let host = Arc::new(MemoryHost::new());
        host.set_spawn_location(Location::new(WorldId::OVERWORLD, 0.5, 64.0, 0.5));

        let ctx = ModuleContext::new(EventBus::new(), host.clone())
            .with_teleport_menu(host.clone())
            .with_config(config);

        let mut registry = ModuleRegistry::new(ctx.clone());
        registry.register(TeleportModule::new(ctx.clone()));
        registry.enable_all();

        let player = PlayerId::random();
        host.join(player);

        Self {
            host,
            ctx,
            registry,
            player,
        }
    }

    fn bus(&self) -> &EventBus {
        self.ctx.bus()
    }

    /// Place an anchor the way the host does: store default data, then dispatch.
    fn place_anchor(&self) -> BlockPlaceEvent {
        self.host.set_block(ANCHOR, Material::RespawnAnchor);
        let mut event = BlockPlaceEvent::new(self.player, ANCHOR, Material::RespawnAnchor);
        self.bus().dispatch(&mut event);
        event
    }

    fn anchor_charges(&self) -> u8 {
        self.host
            .block_data(ANCHOR)
            .and_then(|data| data.as_respawn_anchor().map(RespawnAnchor::charges))
            .unwrap()
    }

    fn right_click_anchor(&self) -> BlockInteractEvent {
        let mut event = BlockInteractEvent::new(
            self.player,
            InteractAction::RightClickBlock,
            Some(ClickedBlock {
                pos: ANCHOR,
                material: Material::RespawnAnchor,
            }),
        );
        self.bus().dispatch(&mut event);
        event
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_enable_subscribes_every_event_type() {
    let server = Server::start(TweaksConfig::default());

    assert_eq!(server.registry.loaded_modules(), vec![TeleportModule::NAME]);
    assert_eq!(server.bus().listener_count::<SpawnSetEvent>(), 1);
    assert_eq!(server.bus().listener_count::<PlayerRespawnEvent>(), 1);
    assert_eq!(server.bus().listener_count::<BlockInteractEvent>(), 1);
    assert_eq!(server.bus().listener_count::<BlockPlaceEvent>(), 1);
    assert_eq!(server.bus().listener_count::<BedEnterEvent>(), 1);
}

#[test]
fn test_missing_menu_is_fatal() {
    let host = Arc::new(MemoryHost::new());
    let ctx = ModuleContext::new(EventBus::new(), host);

    let mut registry = ModuleRegistry::new(ctx.clone());
    registry.register(TeleportModule::new(ctx.clone()));

    let err = registry.enable(TeleportModule::NAME).unwrap_err();
    assert!(matches!(
        err,
        ModuleError::MissingCapability {
            module: TeleportModule::NAME,
            ..
        }
    ));
    assert_eq!(
        registry.state(TeleportModule::NAME),
        Some(ModuleState::Failed)
    );
    assert_eq!(ctx.bus().total_listeners(), 0);
}

#[test]
fn test_switched_off_in_configuration() {
    let config = TweaksConfig::default().with_enabled(TeleportModule::NAME, false);
    let server = Server::start(config);

    assert_eq!(server.bus().total_listeners(), 0);

    let mut event = SpawnSetEvent::new(server.player, None, SpawnCause::PlayerAction);
    server.bus().dispatch(&mut event);
    assert!(!event.is_cancelled());
}

#[test]
fn test_no_handler_runs_after_disable() {
    let mut server = Server::start(TweaksConfig::default());
    server.registry.disable_all();

    assert_eq!(server.bus().total_listeners(), 0);

    let mut spawn = SpawnSetEvent::new(server.player, None, SpawnCause::PlayerAction);
    assert_eq!(server.bus().dispatch(&mut spawn).delivered, 0);
    assert!(!spawn.is_cancelled());

    let fallback = Location::new(WorldId::NETHER, 3.0, 40.0, 3.0);
    let mut respawn = PlayerRespawnEvent::new(server.player, fallback, fallback);
    server.bus().dispatch(&mut respawn);
    assert_eq!(respawn.respawn_location, fallback);

    server.place_anchor();
    assert_eq!(server.anchor_charges(), 0);

    assert!(server.host.sounds().is_empty());
    assert!(server.host.messages().is_empty());
    assert!(server.host.menus().is_empty());
}

#[test]
fn test_disable_mid_dispatch_stops_delivery() {
    let server = Server::start(TweaksConfig::default());
    let registry = Arc::new(Mutex::new(server.registry));

    // A lower tier listener disables every module before the anchor handler runs
    let disabler = Arc::clone(&registry);
    server.ctx.bus().subscribe(
        "disabler",
        Priority::Lowest,
        move |_: &mut BlockPlaceEvent| {
            disabler.lock().disable_all();
        },
    );

    server.host.set_block(ANCHOR, Material::RespawnAnchor);
    let mut event = BlockPlaceEvent::new(server.player, ANCHOR, Material::RespawnAnchor);
    let outcome = server.ctx.bus().dispatch(&mut event);

    assert_eq!(outcome.delivered, 1);
    assert!(server.host.sounds().is_empty());
    assert_eq!(
        server.host.block_data(ANCHOR),
        Some(BlockData::RespawnAnchor(RespawnAnchor::empty()))
    );
}

#[test]
fn test_reload_swaps_settings() {
    let mut server = Server::start(TweaksConfig::default());

    server.registry.reload(TweaksConfig::default().with_settings(
        TeleportModule::NAME,
        serde_json::json!({
            "anchor_placed_sound": "block.note_block.chime",
            "anchor_placed_message": "Anchor ready"
        }),
    ));

    server.place_anchor();

    let sounds = server.host.sounds();
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].sound.key(), "block.note_block.chime");
    assert_eq!(server.host.messages()[0].text, "Anchor ready");
    assert_eq!(server.bus().total_listeners(), 5);
}

// ============================================================================
// Spawn points
// ============================================================================

#[test]
fn test_player_spawn_changes_refused_before_persisting() {
    let server = Server::start(TweaksConfig::default());

    // Something at normal priority that would persist the spawn point
    let persisted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&persisted);
    server.bus().subscribe(
        "spawn-store",
        Priority::Normal,
        move |event: &mut SpawnSetEvent| {
            if !event.is_cancelled() {
                sink.lock().push(event.cause);
            }
        },
    );

    let at = Some(Location::new(WorldId::OVERWORLD, 50.0, 70.0, 50.0));
    for cause in [SpawnCause::PlayerAction, SpawnCause::Other, SpawnCause::Programmatic] {
        let mut event = SpawnSetEvent::new(server.player, at, cause);
        server.bus().dispatch(&mut event);
        assert_eq!(event.is_cancelled(), cause != SpawnCause::Programmatic);
    }

    assert_eq!(*persisted.lock(), vec![SpawnCause::Programmatic]);
}

#[test]
fn test_respawn_follows_world_spawn_at_dispatch_time() {
    let server = Server::start(TweaksConfig::default());
    let here = Location::new(WorldId::OVERWORLD, 300.0, 12.0, -80.0);

    let mut first = PlayerRespawnEvent::new(server.player, here, here);
    server.bus().dispatch(&mut first);
    assert_eq!(
        first.respawn_location,
        Location::new(WorldId::OVERWORLD, 0.5, 64.0, 0.5)
    );

    let moved = Location::new(WorldId::OVERWORLD, 100.5, 72.0, 100.5);
    server.host.set_spawn_location(moved);

    let mut second = PlayerRespawnEvent::new(server.player, here, here);
    server.bus().dispatch(&mut second);
    assert_eq!(second.respawn_location, moved);
}

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_place_then_use_anchor_opens_menu() {
    let server = Server::start(TweaksConfig::default());

    let placed = server.place_anchor();
    assert!(!placed.is_cancelled());
    assert_eq!(server.anchor_charges(), FULL);

    let sounds = server.host.sounds();
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].at, ANCHOR.to_location());
    let defaults = TeleportSettings::default();
    assert_eq!(sounds[0].sound, defaults.anchor_placed_sound);

    let messages = server.host.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].player, server.player);

    let clicked = server.right_click_anchor();
    assert!(clicked.is_cancelled());

    let menus = server.host.menus();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].anchor, ANCHOR);
}

#[test]
fn test_partly_charged_anchor_stays_vanilla() {
    let server = Server::start(TweaksConfig::default());
    server.host.set_block(
        ANCHOR,
        BlockData::RespawnAnchor(RespawnAnchor::with_charges(2).unwrap()),
    );

    let clicked = server.right_click_anchor();

    assert!(!clicked.is_cancelled());
    assert!(server.host.menus().is_empty());
}

#[test]
fn test_repeated_placement_dispatch_repeats_confirmation() {
    let server = Server::start(TweaksConfig::default());
    server.place_anchor();

    // Second dispatch against the already full anchor
    let mut again = BlockPlaceEvent::new(server.player, ANCHOR, Material::RespawnAnchor);
    server.bus().dispatch(&mut again);

    assert_eq!(server.anchor_charges(), FULL);
    assert_eq!(server.host.sounds().len(), 2);
    assert_eq!(server.host.messages().len(), 2);
}

#[test]
fn test_placement_cancelled_by_earlier_listener() {
    let server = Server::start(TweaksConfig::default());
    server.bus().subscribe(
        "region-protect",
        Priority::Low,
        |event: &mut BlockPlaceEvent| event.set_cancelled(true),
    );

    let placed = server.place_anchor();

    assert!(placed.is_cancelled());
    assert_eq!(server.anchor_charges(), 0);
    assert!(server.host.sounds().is_empty());
    assert!(server.host.messages().is_empty());
}

#[test]
fn test_placement_without_build_permission() {
    let server = Server::start(TweaksConfig::default());
    server.host.set_block(ANCHOR, Material::RespawnAnchor);

    let mut event = BlockPlaceEvent::new(server.player, ANCHOR, Material::RespawnAnchor);
    event.can_build = false;
    server.bus().dispatch(&mut event);

    assert_eq!(server.anchor_charges(), 0);
    assert!(server.host.sounds().is_empty());
}

#[test]
fn test_offline_player_gets_sound_but_no_message() {
    let server = Server::start(TweaksConfig::default());
    server.host.quit(server.player);

    server.place_anchor();

    assert_eq!(server.anchor_charges(), FULL);
    assert_eq!(server.host.sounds().len(), 1);
    assert!(server.host.messages().is_empty());
}

// ============================================================================
// Isolation
// ============================================================================

#[test]
fn test_panicking_sibling_does_not_block_module() {
    let server = Server::start(TweaksConfig::default());
    server.bus().subscribe(
        "broken",
        Priority::Low,
        |_: &mut BlockPlaceEvent| panic!("broken listener"),
    );

    server.host.set_block(ANCHOR, Material::RespawnAnchor);
    let mut event = BlockPlaceEvent::new(server.player, ANCHOR, Material::RespawnAnchor);
    let outcome = server.bus().dispatch(&mut event);

    assert_eq!(outcome.panicked, 1);
    assert_eq!(server.anchor_charges(), FULL);
}

#[test]
fn test_bed_entry_untouched() {
    let server = Server::start(TweaksConfig::default());
    let bed = BlockPos::new(WorldId::OVERWORLD, 2, 64, 2);

    let mut event = BedEnterEvent::new(server.player, bed);
    let outcome = server.bus().dispatch(&mut event);

    assert_eq!(outcome.delivered, 1);
    assert_eq!(event, BedEnterEvent::new(server.player, bed));
}
